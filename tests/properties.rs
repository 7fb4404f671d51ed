//! Property tests for the graph invariants.

use std::collections::HashSet;

use nodelink::{
    Angle, BBox, Graph, GraphConfig, LinkId, LinkRecord, Node, NodeId, NodeRecord, Rect, Shape,
};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    AddNode(Option<u64>),
    AddLink(u64, u64),
    RemoveNode(u64),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => proptest::option::of(0u64..12).prop_map(Op::AddNode),
        3 => (0u64..12, 0u64..12).prop_map(|(a, b)| Op::AddLink(a, b)),
        1 => (0u64..12).prop_map(Op::RemoveNode),
    ]
}

fn apply(graph: &mut Graph, op: &Op) {
    match *op {
        Op::AddNode(id) => {
            let mut record = NodeRecord::new();
            record.id = id.map(NodeId);
            let before = graph.nodes().to_vec();
            if graph.add_node(record).is_err() {
                assert_eq!(graph.nodes(), &before[..], "rejected add must not mutate");
            }
        }
        Op::AddLink(a, b) => {
            let before = graph.links().len();
            if graph.add_link(LinkRecord::new(a, b)).is_err() {
                assert_eq!(graph.links().len(), before);
            }
        }
        Op::RemoveNode(id) => {
            let _ = graph.remove_node(NodeId(id));
        }
    }
}

fn assert_consistent(graph: &Graph) {
    let node_ids: HashSet<NodeId> = graph.nodes().iter().map(Node::id).collect();
    assert_eq!(node_ids.len(), graph.nodes().len(), "node ids unique");
    for node in graph.nodes() {
        assert_eq!(graph.node(node.id()).map(Node::id), Some(node.id()));
    }

    let link_ids: HashSet<&LinkId> = graph.links().iter().map(|l| l.id()).collect();
    assert_eq!(link_ids.len(), graph.links().len(), "link ids unique");
    for link in graph.links() {
        assert_eq!(graph.link(link.id()).map(|l| l.id()), Some(link.id()));
        assert!(node_ids.contains(&link.source()));
        assert!(node_ids.contains(&link.target()));
    }

    assert_eq!(graph.bbox(), BBox::recompute(graph.nodes(), graph.config().bbox_padding));
}

proptest! {
    #[test]
    fn ids_stay_unique_and_indexed(directed: bool, ops in proptest::collection::vec(op(), 0..60)) {
        let mut graph = Graph::new(GraphConfig::default().directed(directed));
        for op in &ops {
            apply(&mut graph, op);
            assert_consistent(&graph);
        }
    }

    #[test]
    fn removal_cascades(ops in proptest::collection::vec(op(), 0..60), victim in 0u64..12) {
        let mut graph = Graph::new(GraphConfig::default().directed(true));
        for op in &ops {
            apply(&mut graph, op);
        }
        let incident: Vec<LinkId> = graph
            .links()
            .iter()
            .filter(|l| l.touches(NodeId(victim)))
            .map(|l| l.id().clone())
            .collect();

        if graph.node(NodeId(victim)).is_some() {
            graph.remove_node(NodeId(victim)).unwrap();
        } else {
            prop_assert!(incident.is_empty());
            prop_assert!(graph.remove_node(NodeId(victim)).is_err());
        }
        prop_assert!(graph.node(NodeId(victim)).is_none());
        prop_assert!(graph.links().iter().all(|l| !l.touches(NodeId(victim))));
        for id in &incident {
            prop_assert!(graph.link(id).is_none());
        }
        assert_consistent(&graph);
    }

    #[test]
    fn undirected_ids_are_canonical(a: u64, b: u64) {
        prop_assert_eq!(
            LinkId::derive(NodeId(a), NodeId(b), false),
            LinkId::derive(NodeId(b), NodeId(a), false)
        );
        if a != b {
            prop_assert_ne!(
                LinkId::derive(NodeId(a), NodeId(b), true),
                LinkId::derive(NodeId(b), NodeId(a), true)
            );
        }
    }

    #[test]
    fn rect_points_lie_on_perimeter(
        deg in -720.0f64..720.0,
        w in 1.0f64..200.0,
        h in 1.0f64..200.0,
        x in -500.0f64..500.0,
        y in -500.0f64..500.0,
    ) {
        let node = Node::new(NodeId(0), x, y, w, h).with_shape(Shape::Rect(Rect::default()));
        let p = node.point_at(&Angle::degrees(deg));
        let dx = (p.x - x).abs();
        let dy = (p.y - y).abs();
        let eps = 1e-6;
        let on_vertical = (dx - w / 2.0).abs() < eps && dy <= h / 2.0 + eps;
        let on_horizontal = (dy - h / 2.0).abs() < eps && dx <= w / 2.0 + eps;
        prop_assert!(on_vertical || on_horizontal, "{} at {}° is off the perimeter", p, deg);
    }

    #[test]
    fn reversal_law(
        ax in -300.0f64..300.0, ay in -300.0f64..300.0,
        bx in -300.0f64..300.0, by in -300.0f64..300.0,
        rect_a: bool, rect_b: bool,
    ) {
        prop_assume!((ax - bx).abs() > 1e-3 || (ay - by).abs() > 1e-3);
        let shape = |rect: bool| if rect { Shape::Rect(Rect::default()) } else { Shape::default() };

        let mut graph = Graph::new(GraphConfig::default().directed(true));
        graph.add_node(NodeRecord::new().at(ax, ay).sized(30.0, 20.0).with_shape(shape(rect_a))).unwrap();
        graph.add_node(NodeRecord::new().at(bx, by).sized(20.0, 30.0).with_shape(shape(rect_b))).unwrap();
        let forward = graph.add_link(LinkRecord::new(0, 1)).unwrap();
        let backward = graph.add_link(LinkRecord::new(1, 0)).unwrap();

        let forward = graph.link(&forward).unwrap();
        let backward = graph.link(&backward).unwrap();
        let start = forward.path.start().unwrap();
        let end = forward.path.end().unwrap();
        prop_assert_eq!(forward.reversed, start.x > end.x);
        if start.x != end.x {
            prop_assert_ne!(forward.reversed, backward.reversed);
        }
    }

    #[test]
    fn extend_matches_recompute(
        rects in proptest::collection::vec(
            (-500.0f64..500.0, -500.0f64..500.0, 10.0f64..100.0, 10.0f64..100.0),
            1..30,
        ),
        padding in 0.0f64..100.0,
    ) {
        let nodes: Vec<Node> = rects
            .iter()
            .enumerate()
            .map(|(i, &(x, y, w, h))| Node::new(NodeId(i as u64), x, y, w, h))
            .collect();
        let full = BBox::recompute(&nodes, padding);
        let incremental = nodes[1..]
            .iter()
            .fold(BBox::recompute(&nodes[..1], padding), |bbox, n| bbox.extend(n, padding));
        prop_assert_eq!(full, incremental);
    }
}
