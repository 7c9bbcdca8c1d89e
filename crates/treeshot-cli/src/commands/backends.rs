use treeshot_backends::BUILTIN_NAMES;

pub fn run() {
    println!("Built-in backends ({}):", BUILTIN_NAMES.len());
    for name in BUILTIN_NAMES {
        match treeshot_backends::from_name(name) {
            Some(backend) => println!("  {name} (snapshot label {})", backend.label()),
            None => println!("  {name}"),
        }
    }
}
