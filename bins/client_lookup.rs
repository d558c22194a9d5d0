#[path = "launcher.rs"]
mod launcher;

fn main() -> std::process::ExitCode {
    launcher::launch("client-lookup", server::run_lookup)
}
