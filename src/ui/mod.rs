// UI module - frontend glue for the console surface
//
// This module contains:
// - CalcController: wires input events to state management, history and timers
// - console: the line-oriented display and input loop

pub mod console;
pub mod controller;

pub use controller::CalcController;
