pub mod navigate;
pub mod routes;

#[derive(Debug)]
pub enum Action {
    Routes { base_path: String },
    Navigate(navigate::Args),
}
