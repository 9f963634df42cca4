//! User-facing wording for library errors.

use metroroute_lib::{Error, Network, StationId};

/// Human-readable explanation of a failed route query.
///
/// Unknown stations mention the valid identifier range so the user can retry.
pub fn describe_route_error(network: &Network, error: &Error) -> String {
    match error {
        Error::StationNotFound { station } => match network.stations().id_range() {
            Some((first, last)) => format!(
                "unknown station {station}; known station ids: {first}..{last} ({} stations)",
                network.stations().len()
            ),
            None => format!("unknown station {station}; the network has no stations"),
        },
        Error::Unreachable { start, goal } => format!(
            "no route between {} and {}",
            label(network, *start),
            label(network, *goal)
        ),
        other => other.to_string(),
    }
}

fn label(network: &Network, id: StationId) -> String {
    match network.station_name(id) {
        Some(name) => format!("{name} ({id})"),
        None => id.to_string(),
    }
}
