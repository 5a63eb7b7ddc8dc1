pub mod action;
pub mod app;
pub mod component;
pub mod components;
pub mod config;
pub mod event;
pub mod keymap;
pub mod mount;
pub mod painter;
pub mod scheduler;
pub mod theme;
pub mod tui;
