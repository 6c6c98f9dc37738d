fn main() {
    println!("cargo:rerun-if-changed=native/alsa_shim.c");

    cc::Build::new()
        .file("native/alsa_shim.c")
        .define("DIAGBRIDGE_MESSAGE_CAPACITY", "1024")
        .flag_if_supported("-std=c11")
        .warnings(true)
        .compile("diagbridge_alsa_shim");
}
