//! Cuts the comb with the plane y = 3 and prints the resulting groups.

use plane_split::{split, List, Polygon};
use split_viz::{comb_polygon, horizontal_cut};

fn print_group(name: &str, group: &List<Polygon>) {
    println!("{name}: {} polygon(s)", group.len());
    for (i, polygon) in group.iter().enumerate() {
        let points: Vec<String> = polygon
            .points()
            .map(|p| format!("({}, {}, {})", p.x, p.y, p.z))
            .collect();
        println!("  [{i}] {} vertices: {}", polygon.n_points(), points.join(" "));
    }
}

fn main() {
    env_logger::init();

    let polygon = comb_polygon();
    let cut = horizontal_cut(3.0);
    println!("Splitting a {}-vertex comb by y = 3", polygon.n_points());

    let (mut above, mut on, mut below) = (List::new(), List::new(), List::new());
    split(polygon, &cut, &mut above, &mut on, &mut below);

    print_group("above", &above);
    print_group("on", &on);
    print_group("below", &below);
}
