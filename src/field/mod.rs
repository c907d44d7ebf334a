//! Select field adapter and the hooks it registers on a host form.

mod context;
mod hooks;
mod select;

pub use context::FieldContext;
pub use hooks::{
    FieldHost, HookRegistry, OptionLabelHook, OptionLabelsHook, OptionsHook, SearchResultsHook,
    SelectHooks,
};
pub use select::TranslatableSelect;
