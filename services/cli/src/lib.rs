mod cli;
mod render;

use bonus_engine::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
