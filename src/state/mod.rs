pub mod grid;
pub mod i18n;
pub mod nav;
pub mod value;
