use nodekit::ds::LinkedList;

fn main() {
    let mut list: LinkedList<&str> = ["b", "c", "d"].into_iter().collect();
    let a = list.push_front("a");
    let d = match list.search(|v| *v == "d") {
        Ok(handle) => handle,
        Err(err) => {
            eprintln!("search failed: {err}");
            return;
        },
    };

    if let Err(err) = list.move_to_front(d) {
        eprintln!("move failed: {err}");
    }
    list.for_each(|value, idx| println!("{idx}: {value}"));

    println!("remove(a) = {:?}", list.remove(a));
    // the handle is now stale
    println!("remove(a) again = {:?}", list.remove(a));
}
