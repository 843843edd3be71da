use dioxus::document;
use dioxus::prelude::*;

use crate::context::AppContext;
use crate::vm::{SectionDisplay, SectionItemVm, toolbox_links};

/// Scrolls the card of the given section into view.
pub(super) fn scroll_to(section_id: &str) {
    let js = format!(
        "document.getElementById('section-{section_id}')?.scrollIntoView({{ behavior: 'smooth', block: 'start' }});"
    );
    let _ = document::eval(&js);
}

fn marker(display: SectionDisplay) -> &'static str {
    match display {
        SectionDisplay::Completed => "✓",
        SectionDisplay::Locked => "🔒",
        SectionDisplay::Active => "•",
    }
}

/// Topic list plus the AI toolbox. Topics scroll to their section card;
/// toolbox links open in the system browser.
#[component]
pub(super) fn CourseSidebar(course_title: String, items: Vec<SectionItemVm>) -> Element {
    let ctx = use_context::<AppContext>();
    let opener = ctx.link_opener();

    let topics = items.iter().map(|item| {
        let topic_class = match item.display {
            SectionDisplay::Locked => "topic topic--locked",
            SectionDisplay::Completed => "topic topic--done",
            SectionDisplay::Active => "topic topic--active",
        };
        let section_id = item.id.clone();
        let number = item.index + 1;
        rsx! {
            li { key: "{item.id}",
                button {
                    class: "{topic_class}",
                    onclick: move |_| scroll_to(&section_id),
                    span { class: "topic-marker", {marker(item.display)} }
                    span { class: "topic-label", "{number}. {item.title}" }
                }
            }
        }
    });

    let tools = toolbox_links().iter().map(|link| {
        let opener = opener.clone();
        rsx! {
            li { key: "{link.label}",
                button {
                    class: "toolbox-link",
                    onclick: move |_| opener.open_url(link.url),
                    "{link.label} ↗"
                }
            }
        }
    });

    rsx! {
        aside { class: "course-sidebar",
            h2 { class: "course-sidebar-title", "{course_title}" }
            nav { class: "course-topics",
                ul { {topics} }
            }
            div { class: "course-toolbox",
                h3 { class: "course-toolbox-title", "AI toolbox" }
                ul { {tools} }
            }
        }
    }
}
