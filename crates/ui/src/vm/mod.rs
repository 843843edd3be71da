mod course_vm;
mod markdown_vm;
mod quiz_vm;
mod roster_vm;
mod time_fmt;

pub use course_vm::{
    CourseCardVm, SectionDisplay, SectionItemVm, ToolboxLink, map_course_card, map_section_items,
    toolbox_links,
};
pub use markdown_vm::{markdown_to_html, sanitize_html};
pub use quiz_vm::{
    CELEBRATION_MS, OptionStyle, QuizIntent, QuizOutcome, QuizVm, REVEAL_DELAY_MS, option_style,
};
pub use roster_vm::{RosterRowVm, map_roster_rows};
pub use time_fmt::format_date;
