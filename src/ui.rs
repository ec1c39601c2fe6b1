//! 图形界面
//!
//! eframe application hosting a practice session.

pub mod about;
pub mod app;
pub mod controls;
pub mod diagram_view;
pub mod display;
pub mod theme;
