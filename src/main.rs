use makedmt::{cli, ui::output};

fn main() {
    if let Err(err) = cli::run() {
        output::error(err);
        std::process::exit(1);
    }
}
