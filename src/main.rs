fn main() {
    if let Err(e) = vfriends::run() {
        eprintln!("vfriends: {} ({})", e, e.code());
        std::process::exit(1);
    }
}
