use std::io::Write;

use city_radius::data::{read_store_from_file, DataError};
use city_radius::metric::Metric;
use city_radius::query::points_within_radius;
use city_radius::session::{OutputFormat, Session};

const CITIES: &str = "\
Zurich
47.3769, 8.5417
Geneva
46.2044, 6.1432
Basel
47.5596, 7.5886
Bern
46.9480, 7.4474
Lugano
46.0037, 8.9511
Lausanne
46.5197, 6.6323
";

fn write_data(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(contents.as_bytes()).expect("write data");
    file
}

#[test]
fn integration_load_and_query() {
    let file = write_data(CITIES);
    let store = read_store_from_file(file.path()).expect("load");
    assert_eq!(store.len(), 6);

    let res = points_within_radius(&store, "Bern", 1.2, Metric::Euclidean).unwrap();
    let names: Vec<&str> = res.names().collect();
    // Basel ~0.63, Lausanne ~0.92, Zurich ~1.18
    assert_eq!(names, ["Basel", "Lausanne", "Zurich"]);
    assert_eq!(res.north_count, 2);
    assert!(res.names().all(|n| n != "Bern"));
}

#[test]
fn integration_properties_hold_for_every_reference() {
    let file = write_data(CITIES);
    let store = read_store_from_file(file.path()).expect("load");
    let radii = [0.0, 0.5, 1.0, 1.5, 2.0, 3.0, 100.0];

    for reference in store.iter() {
        for metric in Metric::ALL {
            let mut previous: Option<Vec<String>> = None;
            for radius in radii {
                let res = points_within_radius(&store, &reference.name, radius, metric).unwrap();
                if radius == 0.0 {
                    assert!(res.is_empty());
                }
                assert!(res.north_count <= res.len());
                assert!(res.names().all(|n| n != reference.name));
                assert!(res
                    .neighbours
                    .windows(2)
                    .all(|w| w[0].distance < w[1].distance
                        || (w[0].distance == w[1].distance && w[0].name < w[1].name)));
                assert!(res.neighbours.iter().all(|n| n.distance <= radius));

                let names: Vec<String> = res.names().map(String::from).collect();
                if let Some(smaller) = &previous {
                    assert!(smaller.iter().all(|n| names.contains(n)));
                }
                previous = Some(names);
            }
            assert_eq!(
                points_within_radius(&store, &reference.name, 100.0, metric)
                    .unwrap()
                    .len(),
                store.len() - 1
            );
        }
    }
}

#[test]
fn integration_truncated_file_fails_to_load() {
    let file = write_data("Zurich\n47.3769, 8.5417\nGeneva\n");
    let err = read_store_from_file(file.path()).unwrap_err();
    assert!(matches!(err, DataError::TruncatedRecord { .. }));
}

#[test]
fn integration_malformed_file_fails_to_load() {
    let file = write_data("Zurich\n47.3769; 8.5417\n");
    let err = read_store_from_file(file.path()).unwrap_err();
    assert!(matches!(err, DataError::MalformedCoordinates { line: 2, .. }));
}

#[test]
fn integration_session_over_loaded_file() {
    let file = write_data(CITIES);
    let store = read_store_from_file(file.path()).expect("load");

    let input = "Bern\n1\n2\nLugano\n0\n1\n0\n";
    let mut session = Session::new(&store, input.as_bytes(), Vec::new(), OutputFormat::Text);
    assert_eq!(session.run().unwrap(), 2);
    let out = String::from_utf8(session.into_output()).unwrap();

    // L1 from Bern: Lausanne 0.43 + 0.82 = 1.24, Basel 0.61 + 0.14 = 0.75
    assert!(out.contains(
        "1 city/cities found in the given radius.\n\
         1 cities are to the north of the selected city.\n\
         City list:\nBasel\n"
    ));
    assert!(out.contains(
        "0 city/cities found in the given radius.\n\
         0 cities are to the north of the selected city.\n\
         City list:\n"
    ));
    assert!(out.ends_with("Bye\n"));
}
