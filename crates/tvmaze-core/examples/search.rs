//! Search the live catalog and print the rendered panels
//!
//! ```text
//! RUST_LOG=tvmaze_core=debug cargo run -p tvmaze-core --example search -- bletchley
//! ```

use tracing_subscriber::EnvFilter;
use tvmaze_core::{
    CatalogService, ClickEvent, Controller, ControllerConfig, Document, EPISODES_BUTTON_CLASS,
    HandleSelectors, SubmitEvent, UiEvent, UiHandles,
};

const PAGE: &str = r#"
<main>
  <form id="searchForm"><input id="searchForm-term"><button>Go!</button></form>
  <div id="alertArea"></div>
  <div id="showsList"></div>
  <section id="episodesArea"><h2>Episodes</h2><ul id="episodesList"></ul></section>
</main>
"#;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let term = std::env::args().nth(1).unwrap_or_else(|| "bletchley".to_string());

    let page = Document::parse(PAGE);
    let ui = UiHandles::locate(&page, &HandleSelectors::default())?;
    let config = ControllerConfig {
        show_failures: true,
        ..ControllerConfig::default()
    };
    let controller = Controller::new(CatalogService::new()?, page, ui, config);

    controller.page_mut().set_value(ui.term_input, &term);
    let outcome = controller
        .dispatch(&mut UiEvent::Submit(SubmitEvent::new(ui.search_form)))
        .await?;
    println!("{outcome:?}\n");
    println!("{}\n", controller.page().inner_html(ui.shows_list));

    // Click "Episodes" on the first result
    let first_button = controller
        .page()
        .find_by_class(ui.shows_list, EPISODES_BUTTON_CLASS)
        .first()
        .copied();
    if let Some(target) = first_button {
        let outcome = controller
            .dispatch(&mut UiEvent::Click(ClickEvent { target }))
            .await?;
        println!("{outcome:?}\n");
        println!("{}", controller.page().inner_html(ui.episodes_list));
    }

    Ok(())
}
