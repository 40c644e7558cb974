fn main() {
    #[cfg(target_os = "windows")]
    {
        let mut res = winres::WindowsResource::new();
        res.set("FileDescription", "Pitch-scan TSI/SP reducer");
        res.set("ProductName", "pitch-stability");
        res.compile().expect("Failed to compile Windows resources");
    }
}
