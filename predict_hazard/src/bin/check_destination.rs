use predict_hazard::geodesy::{bearing_and_distance, destination};
use predict_hazard::Coordinate;

fn main() -> anyhow::Result<()> {
    // Chennai
    let start = Coordinate::new(13.0827, 80.2707)?;
    // 1 km due east, expected lat ~13.0827, lon ~80.2799
    let dist_km = 1.0;
    let az = 90.0;
    let dest = destination(start, az, dist_km)?;
    println!("Destination lat={}, lon={}", dest.lat(), dest.lng());

    let (back_az, back_dist) = bearing_and_distance(start, dest);
    println!("Inverse bearing={back_az}, distance={back_dist} km");

    Ok(())
}
