use std::sync::Once;

const DEFAULT_FILTER: &str = "wgpu_primitives=info,wgpu_core=warn,wgpu_hal=warn";

static INIT: Once = Once::new();

/// Installs the `env_logger` backend. `RUST_LOG` overrides the default filter.
/// Later calls are ignored.
pub fn init() {
    INIT.call_once(|| {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(DEFAULT_FILTER))
            .init();
        log::debug!("logging initialized");
    });
}
