use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    calibration_corpus::apps::run_prepare_dailydialog(std::env::args().skip(1))
}
