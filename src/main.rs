#![allow(non_snake_case)]

fn main() {
    // Tracing goes to stderr on desktop; the browser build logs through the
    // console instead.
    #[cfg(not(target_arch = "wasm32"))]
    {
        use tracing_subscriber::EnvFilter;
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new("opsboard=debug")),
            )
            .init();
    }

    #[cfg(any(feature = "web", feature = "desktop"))]
    dioxus::launch(opsboard::app::App);

    #[cfg(not(any(feature = "web", feature = "desktop")))]
    {
        eprintln!("opsboard was built without a renderer; rebuild with --features web or --features desktop");
        std::process::exit(2);
    }
}
