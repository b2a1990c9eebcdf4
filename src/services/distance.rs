//! Great-circle distance and shop ranking

use crate::types::{Coordinates, RankedShop, Shop};

/// Mean Earth radius in kilometers, the fixed constant of the haversine
/// approximation (ellipsoidal correction is not attempted; ~0.5% error is
/// acceptable for nearest-shop ranking)
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two coordinates in kilometers, via the
/// haversine formula. Symmetric, and zero for identical coordinates.
pub fn haversine_km(from: Coordinates, to: Coordinates) -> f64 {
    let lat1 = from.lat.to_radians();
    let lat2 = to.lat.to_radians();
    let d_lat = (to.lat - from.lat).to_radians();
    let d_lng = (to.lng - from.lng).to_radians();

    let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Annotate each shop with its distance from the buyer and sort nearest
/// first. Equal distances keep their input order (stable sort, no secondary
/// key). Without a buyer coordinate, shops pass through unannotated in
/// their input order.
///
/// Distances are always kilometers; rendering in meters under 1 km is a
/// display-layer choice and never affects the stored value or the order.
pub fn rank_shops(shops: &[Shop], buyer: Option<Coordinates>) -> Vec<RankedShop> {
    let Some(buyer) = buyer else {
        return shops
            .iter()
            .map(|shop| RankedShop {
                shop: shop.clone(),
                distance_km: None,
            })
            .collect();
    };

    let mut annotated: Vec<(f64, &Shop)> = shops
        .iter()
        .map(|shop| (haversine_km(buyer, shop.coordinates()), shop))
        .collect();
    // sort_by is stable; total_cmp because distances are f64
    annotated.sort_by(|a, b| a.0.total_cmp(&b.0));

    annotated
        .into_iter()
        .map(|(distance_km, shop)| RankedShop {
            shop: shop.clone(),
            distance_km: Some(distance_km),
        })
        .collect()
}
