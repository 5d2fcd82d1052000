//! Example that demonstrates the exact usage shown in the README.md file.
//!
//! This shows how to use the `hostlist` package for expanding and collecting hostlists.

fn main() {
    println!("=== Hostlist README Example ===");

    let hosts = hostlist::expand("node[1-2,17],login01").unwrap();
    assert_eq!(hosts, vec!["node1", "node2", "node17", "login01"]);

    println!("Expanded hosts: {hosts:?}");
    println!("As hostlist: {}", hostlist::collect(&hosts).unwrap());

    let busy = hostlist::intersect("node[1-20]", "node[15-40]").unwrap();
    println!("Busy nodes: {busy}");

    println!("README example completed successfully!");
}
