use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    spendboard::example_apps::run_dashboard_demo(std::env::args().skip(1))
}
