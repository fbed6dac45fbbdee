fn main() {
    // Stamp the build date so `ropekit --version` output can carry it.
    let build_date = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC");
    println!("cargo:rustc-env=BUILD_DATE={build_date}");
}
