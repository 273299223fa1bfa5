use leptos::prelude::*;

use calorie_tracker::app::App;
use calorie_tracker::config::{init_logging, ClientConfig};
use calorie_tracker::offline::browser::register_service_worker;

fn main() {
    let config = ClientConfig::from_document();
    init_logging(config.log_level);
    log::info!("Calorie tracker starting (api base '{}')", config.api_base);

    register_service_worker();

    leptos::mount::mount_to_body(move || view! { <App config=config.clone() /> });
}
