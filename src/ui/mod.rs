//! Terminal UX helpers: environment detection, output, prompts

mod context;
mod output;
mod progress;
mod prompts;

pub use context::UiContext;
pub use output::{
    key_value, remark, step_error_detail, step_info, step_ok, step_ok_detail, step_warn_hint,
};
pub use progress::TaskSpinner;
pub use prompts::confirm;
