pub mod distance;
pub mod fragment;
pub mod io;
pub mod site;
