use leptos::*;

use crate::components::Layout;
use crate::view::ViewModel;

/// Application root: owns the view model and starts the dashboard shell
#[component]
pub fn App() -> impl IntoView {
    let view_model = ViewModel::new();
    provide_context(view_model.clone());

    #[cfg(target_arch = "wasm32")]
    {
        use crate::config::DashboardConfig;
        use crate::shell::Shell;

        let config = DashboardConfig::from_env();
        log::info!("Dashboard channel: {}", config.socket_url);

        let shell = Shell::new(config, view_model);
        provide_context(shell.controls());
        shell.install_listeners();
        shell.start();
        // controls, listeners, timers and the socket only hold weak handles;
        // the root owner keeps the shell alive for the page's lifetime
        store_value(shell);
    }

    view! { <Layout /> }
}
