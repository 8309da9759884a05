//! surveydb main entrypoint.

use surveydb::run;
use surveydb::ui::messages::error;

fn main() {
    if let Err(e) = run() {
        error(format!("Error: {e}"));
        std::process::exit(1);
    }
}
