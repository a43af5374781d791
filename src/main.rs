#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

fn main() {
    crime_data_viewer::entrypoints::run::native_main();
}
