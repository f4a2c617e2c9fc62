#![deny(clippy::unwrap_used, clippy::dbg_macro, clippy::unimplemented, clippy::todo, clippy::inline_always)]
use std::{
    any::Any,
    fmt::Debug,
    sync::{Arc, OnceLock, RwLock},
};

pub mod context;
pub mod error;
pub mod host;
pub mod plugins;
pub mod setup;
pub use context::RequestContext;
pub use error::PluginError;
pub use host::PluginHost;
pub use setup::{SetupPhase, SetupReport, SetupTracker};
pub use weft_kernel::{set_header, BoxError, BoxResult, ExchangeError, RequestExchange, WfBody, WfRequest, WfResponse};
pub use weft_model;
pub use weft_model::{plugin_meta, PluginAttributes, PluginEnv, PluginMetaData, PluginName, PluginsConfig, RenderMode};

/// # Plugin Trait
/// It's a easy way to define a plugin through this trait.
/// You should give a unique [`name`](Plugin::NAME) for the plugin,
/// and implement the [`setup`](Plugin::setup) function and the [`create`](Plugin::create) function.
///
/// # Example
/// In the follow example, we add a server header for each response.
/// ```rust
/// # use weft_plugin::{Plugin, RequestContext, BoxError, BoxResult, set_header};
/// pub struct ServerHeaderPlugin;
///
/// impl Plugin for ServerHeaderPlugin {
///     const NAME: &'static str = "server-header";
///     fn setup(&self, ctx: &mut RequestContext<'_>) -> BoxResult<()> {
///         if let Some(exchange) = ctx.exchange() {
///             set_header(exchange, "server", "weft")?;
///         }
///         Ok(())
///     }
///     fn create() -> Result<Self, BoxError> {
///         Ok(Self)
///     }
/// }
/// ```
pub trait Plugin: Any + Sized + Send + Sync {
    /// Plugin name, it should be unique repository-wise.
    ///
    /// It's **recommended** to use a **kebab-case** string.
    const NAME: &'static str;
    /// Rendering environments this plugin takes part in.
    fn env() -> PluginEnv {
        PluginEnv::default()
    }
    fn meta() -> PluginMetaData {
        PluginMetaData::default()
    }
    /// Called once per qualifying request, before the response is finalized.
    ///
    /// The context is absent when the host runs setups outside of any request.
    /// Setup must not block, the host runs it synchronously on the request's execution unit.
    fn setup(&self, ctx: &mut RequestContext<'_>) -> BoxResult<()>;
    fn create() -> Result<Self, BoxError>;
    /// Register the plugin to the repository.
    ///
    /// # Errors
    /// If the plugin fails to create, or its name is already registered.
    fn register(repo: &PluginRepository) -> Result<(), PluginError> {
        repo.register_custom(PluginDescriptor::from_trait::<Self>()?)
    }
}

pub type SetupFn = dyn Fn(&mut RequestContext<'_>) -> BoxResult<()> + Send + Sync + 'static;

/// # Plugin Descriptor
/// A named unit of setup logic and the rendering environments it takes part in.
///
/// Descriptors are immutable once built, the repository shares them behind [`Arc`].
pub struct PluginDescriptor {
    name: PluginName,
    env: PluginEnv,
    meta: PluginMetaData,
    setup: Box<SetupFn>,
}

impl Debug for PluginDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginDescriptor").field("name", &self.name).field("env", &self.env).field("meta", &self.meta).finish()
    }
}

/// Build a [`PluginDescriptor`] from its parts.
///
/// Nothing is invoked here, `setup` only runs when the host dispatches a request.
///
/// # Errors
/// [`PluginError::MissingName`] if the name is empty.
pub fn define_plugin<F>(name: &str, env: PluginEnv, setup: F) -> Result<PluginDescriptor, PluginError>
where
    F: Fn(&mut RequestContext<'_>) -> BoxResult<()> + Send + Sync + 'static,
{
    let name = PluginName::new(name).map_err(|_| PluginError::MissingName)?;
    Ok(PluginDescriptor {
        name,
        env,
        meta: PluginMetaData::default(),
        setup: Box::new(setup),
    })
}

impl PluginDescriptor {
    pub fn with_meta(mut self, meta: PluginMetaData) -> Self {
        self.meta = meta;
        self
    }
    pub fn name(&self) -> &PluginName {
        &self.name
    }
    pub fn env(&self) -> PluginEnv {
        self.env
    }
    pub fn meta(&self) -> &PluginMetaData {
        &self.meta
    }
    pub fn attr(&self) -> PluginAttributes {
        PluginAttributes {
            name: self.name.clone(),
            env: self.env,
            meta: self.meta.clone(),
        }
    }
    /// # Errors
    /// If the plugin fails to create, or its name is empty.
    pub fn from_trait<P: Plugin>() -> Result<Self, PluginError> {
        let plugin = P::create().map_err(|source| PluginError::Create { plugin: P::NAME, source })?;
        Ok(define_plugin(P::NAME, P::env(), move |ctx| plugin.setup(ctx))?.with_meta(P::meta()))
    }
    #[inline]
    pub(crate) fn setup(&self, ctx: &mut RequestContext<'_>) -> BoxResult<()> {
        (self.setup)(ctx)
    }
}

/// # Plugin Repository
/// A registry of plugin descriptors, in registration order.
///
/// You can get a global instance through [`PluginRepository::global`].
#[derive(Default, Clone)]
pub struct PluginRepository {
    plugins: Arc<RwLock<Vec<Arc<PluginDescriptor>>>>,
}

impl Debug for PluginRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.plugin_list().iter().map(|attr| &attr.name)).finish()
    }
}

impl PluginRepository {
    /// Get a global instance of this repository.
    ///
    /// Once the repository is initialized, it will register all plugins in this crate.
    pub fn global() -> &'static Self {
        static INIT: OnceLock<PluginRepository> = OnceLock::new();
        INIT.get_or_init(|| {
            let repo = PluginRepository::new();
            if let Err(e) = repo.register_prelude() {
                tracing::error!("[Wf.Plugin] register prelude error: {e}");
            }
            repo
        })
    }

    /// register all plugins in this crates
    ///
    /// # Errors
    /// If some plugin of this crate is already registered.
    pub fn register_prelude(&self) -> Result<(), PluginError> {
        self.register_prelude_with(&PluginsConfig::default())
    }

    /// register all plugins in this crates except the disabled ones
    ///
    /// # Errors
    /// If some plugin of this crate is already registered.
    pub fn register_prelude_with(&self, config: &PluginsConfig) -> Result<(), PluginError> {
        #[cfg(feature = "server-only")]
        self.register_unless_disabled::<plugins::server_only::ServerOnlyPlugin>(config)?;
        #[cfg(not(feature = "server-only"))]
        let _ = config;
        Ok(())
    }

    #[cfg_attr(not(feature = "server-only"), allow(dead_code))]
    fn register_unless_disabled<P: Plugin>(&self, config: &PluginsConfig) -> Result<(), PluginError> {
        if config.is_disabled(P::NAME) {
            tracing::debug!("[Wf.Plugin] plugin {name} disabled by config", name = P::NAME);
            return Ok(());
        }
        self.register::<P>()
    }

    /// create a new empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// register by [`Plugin`] trait
    ///
    /// # Errors
    /// If the plugin fails to create, or its name is already registered.
    pub fn register<P: Plugin>(&self) -> Result<(), PluginError> {
        P::register(self)
    }

    /// register a custom plugin
    ///
    /// Registration never invokes the plugin's setup.
    ///
    /// # Errors
    /// [`PluginError::DuplicateName`] if a plugin with the same name is already registered.
    pub fn register_custom(&self, descriptor: PluginDescriptor) -> Result<(), PluginError> {
        let mut plugins = self.plugins.write().expect("PluginRepository register error");
        if plugins.iter().any(|registered| registered.name == descriptor.name) {
            tracing::warn!("[Wf.Plugin] plugin {name} already registered", name = descriptor.name);
            return Err(PluginError::DuplicateName(descriptor.name));
        }
        tracing::debug!("[Wf.Plugin] register plugin {name}, env: {env:?}", name = descriptor.name, env = descriptor.env);
        plugins.push(Arc::new(descriptor));
        Ok(())
    }

    /// remove a plugin by name, return whether it was registered
    pub fn unregister(&self, name: &str) -> bool {
        let mut plugins = self.plugins.write().expect("PluginRepository register error");
        let before = plugins.len();
        plugins.retain(|registered| registered.name.as_str() != name);
        before != plugins.len()
    }

    /// remove all plugins
    pub fn clear(&self) {
        self.plugins.write().expect("PluginRepository register error").clear();
    }

    pub fn contains(&self, name: &str) -> bool {
        self.plugins.read().expect("PluginRepository register error").iter().any(|registered| registered.name.as_str() == name)
    }

    pub fn get(&self, name: &str) -> Option<Arc<PluginDescriptor>> {
        self.plugins.read().expect("PluginRepository register error").iter().find(|registered| registered.name.as_str() == name).cloned()
    }

    pub fn len(&self) -> usize {
        self.plugins.read().expect("PluginRepository register error").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn plugin_list(&self) -> Vec<PluginAttributes> {
        self.plugins.read().expect("PluginRepository register error").iter().map(|descriptor| descriptor.attr()).collect()
    }

    /// Registered descriptors, the lock is released before any setup runs.
    fn snapshot(&self) -> Vec<Arc<PluginDescriptor>> {
        self.plugins.read().expect("PluginRepository register error").clone()
    }

    /// Run the setup of every plugin eligible for the exchange's render mode.
    ///
    /// The render mode is read from the request's [`RenderMode`] extension. When the request carries none,
    /// `fallback` is used and pinned on the request, so later dispatches of the same exchange keep that mode.
    ///
    /// Each plugin's setup runs at most once per exchange, plugins that already ran for it are skipped.
    ///
    /// # Errors
    /// The first setup error, wrapped in [`PluginError::Setup`]. The remaining plugins are not run.
    pub fn dispatch(&self, exchange: &mut RequestExchange, fallback: RenderMode) -> Result<SetupReport, PluginError> {
        let mode = *exchange.extensions_mut().get_or_insert_with(|| fallback);
        if mode != fallback {
            tracing::debug!("[Wf.Plugin] request is pinned to {mode} mode, ignore {fallback}");
        }
        let mut report = SetupReport::new(mode);
        for descriptor in self.snapshot() {
            let name = &descriptor.name;
            if !descriptor.env.allows(mode) {
                tracing::trace!("[Wf.Plugin] skip plugin {name} in {mode} mode");
                report.skipped.push(name.clone());
                continue;
            }
            if !exchange.extensions_mut().get_or_insert_default::<SetupTracker>().enter(name) {
                tracing::trace!("[Wf.Plugin] plugin {name} already set up for this request");
                continue;
            }
            let span = tracing::debug_span!("plugin_setup", plugin = %name, request_id = ?exchange.request_id());
            let result = {
                let _entered = span.enter();
                descriptor.setup(&mut RequestContext::new(exchange))
            };
            exchange.extensions_mut().get_or_insert_default::<SetupTracker>().complete(name);
            if let Err(source) = result {
                tracing::error!("[Wf.Plugin] plugin {name} setup error: {source}");
                return Err(PluginError::Setup { plugin: name.clone(), source });
            }
            report.invoked.push(name.clone());
        }
        Ok(report)
    }

    /// Run the setup of every plugin eligible for `mode` without any request in scope.
    ///
    /// # Errors
    /// The first setup error, wrapped in [`PluginError::Setup`].
    pub fn setup_detached(&self, mode: RenderMode) -> Result<SetupReport, PluginError> {
        let mut report = SetupReport::new(mode);
        for descriptor in self.snapshot() {
            let name = &descriptor.name;
            if !descriptor.env.allows(mode) {
                report.skipped.push(name.clone());
                continue;
            }
            let span = tracing::debug_span!("plugin_setup", plugin = %name, detached = true);
            let _entered = span.enter();
            descriptor.setup(&mut RequestContext::absent()).map_err(|source| PluginError::Setup { plugin: name.clone(), source })?;
            report.invoked.push(name.clone());
        }
        Ok(report)
    }
}
