//! Drives a select engine through a scripted interaction and prints the
//! directives a host would execute.
//!
//! Run with logging to watch the pipeline:
//!
//! ```sh
//! RUST_LOG=horizon_select=trace cargo run --example fruit_picker
//! ```

use horizon_select::prelude::*;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let model = StringListModel::from(["Apple", "Banana", "Blueberry", "Cherry", "Date"]);
    let mut select = SelectEngine::new(Box::new(model));

    select.selected_text_changed.connect(|text: &String| {
        println!("  >> selection changed: {text:?}");
    });

    let script: Vec<(&str, Action<String>)> = vec![
        ("press ArrowDown (opens)", Action::ArrowDown),
        ("press ArrowDown", Action::ArrowDown),
        ("type 'b'", Action::CharacterKey('b')),
        ("type 'l'", Action::CharacterKey('l')),
        ("press Enter", Action::Enter),
        ("press ArrowUp (reopens)", Action::ArrowUp),
        ("hover item 4", Action::ItemHover(4)),
        ("click item 4", Action::ItemClick(4)),
    ];

    for (description, action) in script {
        let directives = select.dispatch(action);
        println!(
            "{description}: open={} highlighted={} keys={:?}",
            select.is_open(),
            select.highlighted_index(),
            select.keys_so_far(),
        );
        for directive in directives {
            println!("  -> {directive:?}");
        }
    }

    // What a renderer would write into its accessibility surface.
    let attrs = select.attributes();
    println!("\ntoggle: id={} expanded={}", attrs.toggle.id, attrs.toggle.expanded);
    println!(
        "list:   id={} reachable={}",
        attrs.list.id, attrs.list.keyboard_reachable
    );
    for option in &attrs.options {
        println!(
            "option: id={} selected={} ({}/{})",
            option.id, option.selected, option.position_in_set, option.set_size
        );
    }
}
