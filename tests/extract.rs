use refgraph::{
    deserialize, write_graph, ConstantKind, FileSink, GraphBuilder, InMemoryRepository, Name,
    ReferenceGraph, MAX_ROUNDS,
};
use std::fs;

const ENVIRONMENT: &str = r#"
- name: Nat.add_comm
  form: theorem
  references: [Nat.add, Eq, Nat.rec, Nat.add_succ]
- name: Nat.add
  form: definition
  references: [Nat, Nat.rec, Nat.add]
- name: Nat.add_succ
  form: theorem
  references: [Nat.add, Eq.refl]
- name: Nat.rec
  form: recursor
- name: Nat
  form: inductive
- name: Eq
  form: inductive
- name: Eq.refl
  form: constructor
"#;

#[test]
fn extract_from_yaml_environment() {
    let dir = tempfile::tempdir().unwrap();
    let env = dir.path().join("env.yaml");
    fs::write(&env, ENVIRONMENT).unwrap();

    let repo = InMemoryRepository::load(&env).unwrap();
    let root = Name::parse("Nat.add_comm").unwrap();
    let (graph, stats) = GraphBuilder::new(&repo).build_with_stats(&root).unwrap();

    assert!(stats.rounds <= MAX_ROUNDS);
    assert!(!stats.truncated);
    assert_eq!(graph.len(), 7);
    assert!(graph.dangling().is_empty());

    let path = write_graph(&graph, &root, &mut FileSink::new(dir.path()), false).unwrap();
    assert_eq!(path.file_name().unwrap(), "Nat.add_comm.json");

    let nodes = deserialize(&fs::read(&path).unwrap()).unwrap();
    let order: Vec<String> = nodes.iter().map(|n| n.name.to_string()).collect();
    assert_eq!(
        order,
        vec![
            "Nat.add_comm",
            "Nat.add",
            "Eq",
            "Nat.rec",
            "Nat.add_succ",
            "Nat",
            "Eq.refl"
        ]
    );
    assert_eq!(nodes[0].const_type, ConstantKind::Theorem);
    assert_eq!(nodes[1].const_type, ConstantKind::Definition);
    assert_eq!(nodes[3].const_type, ConstantKind::Other);

    let view = ReferenceGraph::from_nodes(nodes);
    let stats = view.stats();
    assert_eq!(stats.nodes, 7);
    assert_eq!(stats.stubs, 0);
    assert_eq!(stats.edges, 9);
    assert_eq!(stats.self_loops, 1);
}

#[test]
fn unresolved_root_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let env = dir.path().join("env.yaml");
    fs::write(&env, ENVIRONMENT).unwrap();

    let repo = InMemoryRepository::load(&env).unwrap();
    let err = GraphBuilder::new(&repo)
        .build(&Name::parse("Nat.mul_comm").unwrap())
        .unwrap_err();
    assert!(err.is_unresolved_root());
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
}
