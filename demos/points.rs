//! Walks every operation of `FixedArray` with a small point type: create,
//! append, get, ordered removal (including out-of-range indices), for_each,
//! set (including out-of-range), sort, binary search, clear, drop.

use bunarr::FixedArray;

#[derive(Clone, Copy, Debug, PartialEq)]
struct Point {
    x: i32,
    y: i32,
}

fn main() {
    println!("_________Initializing Array___________");

    let mut points = FixedArray::with_capacity(20);
    for p in &[
        Point { x: 1, y: 10 },
        Point { x: 2, y: 9 },
        Point { x: 3, y: 8 },
        Point { x: 4, y: 7 },
    ] {
        points.append(*p);
    }

    println!("\n_________Testing append_________");

    for i in 0..10 {
        let p = Point { x: i, y: 40 + (i * 37) % 50 };
        println!("Appending point = {{{},{}}}", p.x, p.y);
        points.append(p);
    }

    println!("\n_________Testing get_________");

    for i in 0..points.len() {
        let p = points.get(i).unwrap();
        println!("Get point[{}] = {{{},{}}}", i, p.x, p.y);
    }

    println!("\n_________Testing Removal___________");

    points.remove(0);
    points.remove(5);
    points.remove(8);

    // these fail the index rule and leave the array untouched
    points.remove(points.capacity());
    points.remove(555);

    points.remove(points.len());

    println!("\n_________Testing for_each_____________");

    points.for_each(|i, p| println!("point[{}] = {{{},{}}}", i, p.x, p.y));

    println!("\n_________Testing set_________");

    let np5 = Point { x: 99, y: 99 };
    points.set(np5, 0);

    // out-of-range indices fall back to append
    points.set(np5, 5555);
    points.set(np5, points.capacity());

    points.set(np5, points.len());

    points.for_each(|i, p| println!("point[{}] = {{{},{}}}", i, p.x, p.y));

    println!("\n__________Testing X Sorting and Searching__________");

    points.sort(|a, b| a.x.cmp(&b.x));
    points.for_each(|i, p| println!("point[{}] = {{{},{}}}", i, p.x, p.y));

    let key = Point { x: 99, y: 99 };
    if let Some(result) = points.binary_search(&key, |a, b| a.y.cmp(&b.y)) {
        println!("Result Point found: {{{},{}}}", result.x, result.y);
    }

    println!("\n________Items after clear________");

    points.clear();
    points.for_each(|i, p| println!("point[{}] = {{{},{}}}", i, p.x, p.y));

    println!("\n______freeing and exiting program______");
    std::mem::drop(points);
}
