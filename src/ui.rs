pub mod controller;
pub mod form;
pub mod render;
pub mod sort;
pub mod view;
pub mod visibility;
