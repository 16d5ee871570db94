pub mod form;
pub mod tabs;
pub mod toast;
