use shipnet::{Itinerary, LocationTree, NetworkError};

/// Root → A (no distance), A →5→ B, A →3→ C, C →2→ D, B →4→ E,
/// plus a second root-attached subtree: Root → X, X →7→ Y.
fn sample_network() -> LocationTree {
    let mut network = LocationTree::new();
    network.add_location("A").unwrap();
    network.add_route("A", "B", 5.0).unwrap();
    network.add_route("A", "C", 3.0).unwrap();
    network.add_route("C", "D", 2.0).unwrap();
    network.add_route("B", "E", 4.0).unwrap();
    network.add_location("X").unwrap();
    network.add_route("X", "Y", 7.0).unwrap();
    network
}

fn stop_names(itinerary: &Itinerary) -> Vec<&str> {
    itinerary.stops.iter().map(|stop| stop.as_ref()).collect()
}

#[test]
fn test_siblings_meet_at_their_parent() {
    let mut network = LocationTree::new();
    network.add_location("A").unwrap();
    network.add_route("A", "B", 5.0).unwrap();
    network.add_route("A", "C", 3.0).unwrap();

    let itinerary = network.shortest_path("B", "C").unwrap();

    assert_eq!(stop_names(&itinerary), vec!["B", "A", "C"]);
    assert!((itinerary.total_distance - 8.0).abs() < 1e-9);
}

#[test]
fn test_same_origin_and_destination() {
    let network = sample_network();
    let itinerary = network.shortest_path("B", "B").unwrap();

    assert_eq!(stop_names(&itinerary), vec!["B"]);
    assert_eq!(itinerary.total_distance, 0.0);
}

#[test]
fn test_ancestor_descendant_degenerates_to_one_leg() {
    let network = sample_network();

    // Downward: the origin is the common ancestor.
    let down = network.shortest_path("A", "D").unwrap();
    assert_eq!(stop_names(&down), vec!["A", "C", "D"]);
    assert!((down.total_distance - 5.0).abs() < 1e-9);

    // Upward: the destination is the common ancestor.
    let up = network.shortest_path("D", "A").unwrap();
    assert_eq!(stop_names(&up), vec!["D", "C", "A"]);
    assert!((up.total_distance - 5.0).abs() < 1e-9);
}

#[test]
fn test_paths_across_subtrees() {
    let network = sample_network();
    let test_cases = vec![
        ("E", "D", vec!["E", "B", "A", "C", "D"], 14.0),
        ("D", "E", vec!["D", "C", "A", "B", "E"], 14.0),
        ("E", "C", vec!["E", "B", "A", "C"], 12.0),
        ("B", "D", vec!["B", "A", "C", "D"], 10.0),
        // Crossing the root: the root itself and the root-attached
        // locations contribute no edge distance.
        ("B", "Y", vec!["B", "A", "Distribution Center", "X", "Y"], 12.0),
        ("Y", "E", vec!["Y", "X", "Distribution Center", "A", "B", "E"], 16.0),
    ];

    for (origin, destination, expected_stops, expected_total) in test_cases {
        println!("Testing path: {origin} → {destination}");
        let itinerary = network.shortest_path(origin, destination).unwrap();

        assert_eq!(stop_names(&itinerary), expected_stops, "Wrong stops for {origin} → {destination}");
        assert!(
            (itinerary.total_distance - expected_total).abs() < 1e-9,
            "Wrong total for {origin} → {destination}: expected {expected_total}, got {}",
            itinerary.total_distance
        );

        // First and last stops are always the endpoints themselves.
        assert_eq!(itinerary.stops.first().map(|s| s.as_ref()), Some(origin));
        assert_eq!(itinerary.stops.last().map(|s| s.as_ref()), Some(destination));
    }
}

#[test]
fn test_total_distance_matches_reconstruction_from_stops() {
    let network = sample_network();
    let pairs =
        vec![("E", "D"), ("B", "C"), ("A", "E"), ("Y", "D"), ("D", "A"), ("B", "B")];

    for (origin, destination) in pairs {
        let itinerary = network.shortest_path(origin, destination).unwrap();

        // Every stop on the path contributes its own edge distance except
        // the common ancestor, which sits at the top of both legs.
        let origin_id = network.node_id_by_name(origin).unwrap();
        let destination_id = network.node_id_by_name(destination).unwrap();
        let lca_id = network.lowest_common_ancestor(origin_id, destination_id);
        let lca_name = network.name(&lca_id);

        let reconstructed: f64 = itinerary
            .stops
            .iter()
            .filter(|stop| **stop != lca_name)
            .map(|stop| {
                network.find_location(stop.as_ref()).unwrap().distance().unwrap_or(0.0)
            })
            .sum();

        assert!(
            (itinerary.total_distance - reconstructed).abs() < 1e-9,
            "Total mismatch for {origin} → {destination}: reported {}, reconstructed {reconstructed}",
            itinerary.total_distance
        );
    }
}

#[test]
fn test_lowest_common_ancestor_selection() {
    let network = sample_network();
    let test_cases = vec![
        ("E", "D", "A"),
        ("B", "C", "A"),
        ("C", "D", "C"),
        ("D", "D", "D"),
        ("E", "Y", "Distribution Center"),
    ];

    for (left, right, expected) in test_cases {
        let left_id = network.node_id_by_name(left).unwrap();
        let right_id = network.node_id_by_name(right).unwrap();
        let lca_id = network.lowest_common_ancestor(left_id, right_id);
        assert_eq!(
            network.name(&lca_id).as_ref(),
            expected,
            "Wrong common ancestor for ({left}, {right})"
        );
    }
}

#[test]
fn test_missing_endpoints_are_reported() {
    let network = sample_network();

    match network.shortest_path("Ghost", "B") {
        Err(NetworkError::NotFound(name)) => assert_eq!(name, "Ghost"),
        other => panic!("Expected NotFound for missing origin, got {other:?}"),
    }

    match network.shortest_path("B", "Ghost") {
        Err(NetworkError::NotFound(name)) => assert_eq!(name, "Ghost"),
        other => panic!("Expected NotFound for missing destination, got {other:?}"),
    }

    assert!(network.shortest_path("Ghost", "Phantom").is_err());
}

#[test]
fn test_itinerary_display() {
    let network = sample_network();
    let itinerary = network.shortest_path("B", "C").unwrap();
    assert_eq!(format!("{itinerary}"), "B → A → C (8 Km)");
}
