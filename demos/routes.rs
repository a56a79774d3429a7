use shipnet::LocationTree;

fn main() {
    let mut network = LocationTree::new();

    let _ = network.add_location("Bogota").ok();
    let _ = network.add_route("Bogota", "Medellin", 415.0).ok();
    let _ = network.add_route("Bogota", "Cali", 460.0).ok();
    let _ = network.add_route("Medellin", "Monteria", 243.0).ok();
    let _ = network.add_route("Cali", "Pasto", 388.0).ok();

    println!("{network}");

    match network.shortest_path("Monteria", "Pasto") {
        Ok(itinerary) => println!("{itinerary}"),
        Err(err) => println!("{err}"),
    }
}
