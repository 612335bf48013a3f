pub mod landings;
