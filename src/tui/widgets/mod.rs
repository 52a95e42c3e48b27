pub mod filters;
pub mod form;
pub mod header;
pub mod locations;
pub mod map;
pub mod route;
pub mod statusbar;
