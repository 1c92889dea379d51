pub mod app;
pub mod canvas;
pub mod controls;
pub mod event;
pub mod help;
pub mod input;
pub mod status;
pub mod theme;
