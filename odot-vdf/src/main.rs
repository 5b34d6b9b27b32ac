use clap::Parser;
use odot_vdf::app::{VdfApp, VdfAppError};

fn main() -> Result<(), VdfAppError> {
    env_logger::init();
    let args = VdfApp::parse();
    args.op.run()
}
