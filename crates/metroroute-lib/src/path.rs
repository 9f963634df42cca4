use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet, BinaryHeap};
use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::graph::{Graph, LineId, Link};
use crate::stations::StationId;

/// How the next station to settle is selected during Dijkstra's search.
///
/// Both strategies settle stations in the same order (lowest tentative
/// distance, then lowest id), so they return identical routes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchStrategy {
    /// Linear scan of the unvisited set, O(V²).
    #[default]
    Scan,
    /// Binary heap with lazy deletion, O((V + E) log V).
    Heap,
}

impl fmt::Display for SearchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            SearchStrategy::Scan => "scan",
            SearchStrategy::Heap => "heap",
        };
        f.write_str(value)
    }
}

/// One hop of a route.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Leg {
    pub from: StationId,
    pub to: StationId,
    pub line: LineId,
    pub distance: f64,
}

/// Shortest route between two stations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route {
    /// Stations from start to goal, both inclusive.
    pub stations: Vec<StationId>,
    /// Total length in kilometres.
    pub distance: f64,
    pub legs: Vec<Leg>,
}

impl Route {
    pub fn start(&self) -> Option<StationId> {
        self.stations.first().copied()
    }

    pub fn goal(&self) -> Option<StationId> {
        self.stations.last().copied()
    }

    /// Number of hops in the route.
    pub fn hop_count(&self) -> usize {
        self.stations.len().saturating_sub(1)
    }

    /// `true` when the route travels directly between `a` and `b` in either direction.
    pub fn uses_link(&self, a: StationId, b: StationId) -> bool {
        self.legs
            .iter()
            .any(|leg| (leg.from == a && leg.to == b) || (leg.from == b && leg.to == a))
    }
}

/// Find the shortest route between `start` and `goal` with the default strategy.
pub fn shortest_path(graph: &Graph, start: StationId, goal: StationId) -> Result<Route> {
    shortest_path_with(graph, start, goal, SearchStrategy::default())
}

/// Find the shortest route between `start` and `goal` using `strategy`.
pub fn shortest_path_with(
    graph: &Graph,
    start: StationId,
    goal: StationId,
    strategy: SearchStrategy,
) -> Result<Route> {
    for station in [start, goal] {
        if !graph.contains(station) {
            return Err(Error::StationNotFound { station });
        }
    }

    let search = match strategy {
        SearchStrategy::Scan => search_by_scan(graph, start, goal),
        SearchStrategy::Heap => search_by_heap(graph, start, goal),
    };

    let route = search.into_route(start, goal);
    match &route {
        Some(route) => debug!(
            start,
            goal,
            %strategy,
            hops = route.hop_count(),
            distance = route.distance,
            "route found"
        ),
        None => debug!(start, goal, %strategy, "goal unreachable"),
    }
    route.ok_or(Error::Unreachable { start, goal })
}

/// Tentative distances and best-known predecessors of a search.
#[derive(Debug, Default)]
struct Search {
    distances: BTreeMap<StationId, f64>,
    parents: BTreeMap<StationId, (StationId, Link)>,
}

impl Search {
    fn starting_at(start: StationId) -> Self {
        let mut search = Self::default();
        search.distances.insert(start, 0.0);
        search
    }

    fn distance(&self, station: StationId) -> f64 {
        self.distances
            .get(&station)
            .copied()
            .unwrap_or(f64::INFINITY)
    }

    /// Relax the link `current -> next`, returning the improved distance if any.
    fn relax(&mut self, current: StationId, next: StationId, link: Link) -> Option<f64> {
        let candidate = self.distance(current) + link.distance;
        if candidate < self.distance(next) {
            self.distances.insert(next, candidate);
            self.parents.insert(next, (current, link));
            Some(candidate)
        } else {
            None
        }
    }

    fn into_route(self, start: StationId, goal: StationId) -> Option<Route> {
        let distance = self.distance(goal);
        if distance.is_infinite() {
            return None;
        }

        let mut stations = vec![goal];
        let mut legs = Vec::new();
        let mut current = goal;
        while current != start {
            let (previous, link) = self.parents.get(&current).copied()?;
            legs.push(Leg {
                from: previous,
                to: current,
                line: link.line,
                distance: link.distance,
            });
            stations.push(previous);
            current = previous;
        }
        stations.reverse();
        legs.reverse();

        Some(Route {
            stations,
            distance,
            legs,
        })
    }
}

fn search_by_scan(graph: &Graph, start: StationId, goal: StationId) -> Search {
    let mut search = Search::starting_at(start);
    let mut unvisited: BTreeSet<StationId> = graph.stations().collect();

    while let Some(current) = closest_unvisited(&unvisited, &search) {
        unvisited.remove(&current);
        if current == goal || search.distance(current).is_infinite() {
            break;
        }

        for (next, link) in graph.neighbours(current) {
            if unvisited.contains(&next) {
                search.relax(current, next, link);
            }
        }
    }

    search
}

/// Unvisited station with the lowest tentative distance.
///
/// `min_by` keeps the first of equal elements, so ties go to the lowest id.
fn closest_unvisited(unvisited: &BTreeSet<StationId>, search: &Search) -> Option<StationId> {
    unvisited
        .iter()
        .copied()
        .min_by(|a, b| search.distance(*a).total_cmp(&search.distance(*b)))
}

fn search_by_heap(graph: &Graph, start: StationId, goal: StationId) -> Search {
    let mut search = Search::starting_at(start);
    let mut settled = BTreeSet::new();
    let mut queue = BinaryHeap::new();
    queue.push(QueueEntry::new(start, 0.0));

    while let Some(entry) = queue.pop() {
        if settled.contains(&entry.node) || entry.cost.0 > search.distance(entry.node) {
            continue;
        }
        settled.insert(entry.node);
        if entry.node == goal {
            break;
        }

        for (next, link) in graph.neighbours(entry.node) {
            if settled.contains(&next) {
                continue;
            }
            if let Some(cost) = search.relax(entry.node, next, link) {
                queue.push(QueueEntry::new(next, cost));
            }
        }
    }

    search
}

#[derive(Copy, Clone, Debug, Default)]
struct FloatOrd(f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct QueueEntry {
    node: StationId,
    cost: FloatOrd,
}

impl QueueEntry {
    fn new(node: StationId, cost: f64) -> Self {
        Self {
            node,
            cost: FloatOrd(cost),
        }
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap becomes a min-heap by cost, then id.
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
