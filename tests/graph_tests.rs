//! Partition graph, alias, runtime session and layout tests

use model_graph_sdk::{
    AliasError, AliasResolver, Bounds, JoinEdge, LayoutConfig, Partition, PartitionTable,
    PhysicalGraphLayout, RuntimePartitionService, TableKind,
};

fn placed_table(name: &str, kind: TableKind, x: f64, y: f64) -> PartitionTable {
    let mut t = PartitionTable::new(name, kind);
    t.bounds = Bounds::new(x, y, 150.0, 90.0);
    t
}

mod alias_tests {
    use super::*;

    #[test]
    fn test_resolve_terminates_within_chain_depth() {
        let mut p = Partition::new("sales");
        p.add_table(placed_table("base", TableKind::Table, 0.0, 0.0))
            .unwrap();
        let resolver = AliasResolver::new();
        // Build a chain of depth 5 through create_alias.
        let mut previous = "base".to_string();
        for i in 0..5 {
            let alias = format!("a{}", i);
            resolver.create_alias(&mut p, &previous, &alias).unwrap();
            previous = alias;
        }
        assert_eq!(resolver.resolve_source(&p, &previous).unwrap(), "base");
    }

    #[test]
    fn test_cyclic_alias_map_raises() {
        let mut p = Partition::new("sales");
        p.aliases.insert("x".into(), "y".into());
        p.aliases.insert("y".into(), "z".into());
        p.aliases.insert("z".into(), "x".into());
        let resolver = AliasResolver::new();
        for start in ["x", "y", "z"] {
            let err = resolver.resolve_source(&p, start).unwrap_err();
            assert!(matches!(err, AliasError::CyclicAlias(_)));
        }
    }

    #[test]
    fn test_create_alias_on_view_copies_sql_catalog_schema() {
        let mut p = Partition::new("sales");
        let mut view = placed_table("daily", TableKind::View, 0.0, 0.0);
        view.sql = Some("SELECT * FROM orders".into());
        view.catalog = Some("main".into());
        view.schema = Some("public".into());
        p.add_table(view).unwrap();

        let resolver = AliasResolver::new();
        resolver.create_alias(&mut p, "daily", "daily2").unwrap();

        let alias = p.table("daily2").unwrap();
        assert_eq!(alias.kind, TableKind::View);
        assert_eq!(alias.sql.as_deref(), Some("SELECT * FROM orders"));
        assert_eq!(alias.catalog.as_deref(), Some("main"));
        assert_eq!(alias.schema.as_deref(), Some("public"));
        assert_eq!(p.aliases.get("daily2").map(String::as_str), Some("daily"));
    }

    #[test]
    fn test_create_alias_on_table_copies_catalog_schema_only() {
        let mut p = Partition::new("sales");
        let mut table = placed_table("orders", TableKind::Table, 0.0, 0.0);
        table.sql = Some("should not be copied".into());
        table.catalog = Some("main".into());
        table.schema = Some("public".into());
        p.add_table(table).unwrap();

        let resolver = AliasResolver::new();
        resolver.create_alias(&mut p, "orders", "orders2").unwrap();

        let alias = p.table("orders2").unwrap();
        assert_eq!(alias.kind, TableKind::Alias);
        assert!(alias.sql.is_none());
        assert_eq!(alias.catalog.as_deref(), Some("main"));
        assert_eq!(alias.schema.as_deref(), Some("public"));
    }

    #[test]
    fn test_created_alias_inherits_dimensions_and_does_not_overlap() {
        let mut p = Partition::new("sales");
        p.add_table(placed_table("orders", TableKind::Table, 0.0, 0.0))
            .unwrap();
        let resolver = AliasResolver::new();
        resolver.create_alias(&mut p, "orders", "o1").unwrap();
        resolver.create_alias(&mut p, "orders", "o2").unwrap();

        let o1 = p.table("o1").unwrap().bounds;
        let o2 = p.table("o2").unwrap().bounds;
        let source = p.table("orders").unwrap().bounds;
        assert_eq!(o1.width, source.width);
        assert_eq!(o1.height, source.height);
        assert!(!o1.intersects(&source));
        assert!(!o1.intersects(&o2));
        assert!(!o2.intersects(&source));
    }

    #[test]
    fn test_alias_of_alias_resolves_to_root_source() {
        let mut p = Partition::new("sales");
        p.add_table(placed_table("orders", TableKind::Table, 0.0, 0.0))
            .unwrap();
        let resolver = AliasResolver::new();
        resolver.create_alias(&mut p, "orders", "o1").unwrap();
        resolver.create_alias(&mut p, "o1", "o2").unwrap();
        // The alias map registers the ultimate source, not the hop.
        assert_eq!(p.aliases.get("o2").map(String::as_str), Some("orders"));
    }

    #[test]
    fn test_create_alias_duplicate_name_rejected_without_mutation() {
        let mut p = Partition::new("sales");
        p.add_table(placed_table("orders", TableKind::Table, 0.0, 0.0))
            .unwrap();
        let before = p.clone();
        let resolver = AliasResolver::new();
        let err = resolver.create_alias(&mut p, "orders", "orders").unwrap_err();
        assert!(matches!(err, AliasError::DuplicateName(_)));
        assert_eq!(p, before);
    }

    #[test]
    fn test_edit_alias_repoints_every_join_endpoint() {
        let mut p = Partition::new("sales");
        p.add_table(placed_table("orders", TableKind::Table, 0.0, 0.0))
            .unwrap();
        p.add_table(placed_table("customers", TableKind::Table, 0.0, 200.0))
            .unwrap();
        let resolver = AliasResolver::new();
        resolver.create_alias(&mut p, "orders", "T1").unwrap();
        p.add_join(JoinEdge::new("T1", "customer_id", "customers", "id"))
            .unwrap();
        p.add_join(JoinEdge::new("orders", "parent_id", "T1", "id"))
            .unwrap();

        resolver.edit_alias(&mut p, "T2", "T1").unwrap();

        for join in &p.joins {
            assert_ne!(join.from_table, "T1");
            assert_ne!(join.to_table, "T1");
            assert!(p.contains_table(&join.from_table));
            assert!(p.contains_table(&join.to_table));
        }
        assert_eq!(p.joins[0].from_table, "T2");
        assert_eq!(p.joins[1].to_table, "T2");
    }

    #[test]
    fn test_edit_alias_unknown_name() {
        let mut p = Partition::new("sales");
        let resolver = AliasResolver::new();
        let err = resolver.edit_alias(&mut p, "T2", "T1").unwrap_err();
        assert!(matches!(err, AliasError::TableNotFound(_)));
        assert!(err.to_string().contains("T1"));
    }
}

mod runtime_tests {
    use super::*;

    #[test]
    fn test_session_lifecycle_with_edits() {
        let mut service = RuntimePartitionService::new();
        let mut p = Partition::new("sales");
        p.add_table(placed_table("orders", TableKind::Table, 0.0, 0.0))
            .unwrap();
        let id = service.open_session(p);

        service.update_graph_pane_size(&id, 1280.0, 720.0);
        let rp = service.runtime_partition(&id).unwrap();
        assert_eq!(rp.graph_width, 1280.0);
        assert_eq!(rp.graph_height, 720.0);

        let resolver = AliasResolver::new();
        resolver
            .create_alias(service.partition_mut(&id).unwrap(), "orders", "o1")
            .unwrap();
        assert!(service.partition(&id).unwrap().contains_table("o1"));

        assert!(service.update_graph_node_width(&id, "o1", 300.0));
        assert!(!service.update_graph_node_width(&id, "o1", 300.0));

        service.close_session(&id);
        assert!(service.partition(&id).is_err());
    }
}

mod layout_tests {
    use super::*;

    fn star_partition() -> Partition {
        let mut p = Partition::new("star");
        for name in ["fact", "dim_a", "dim_b", "dim_c", "loose"] {
            p.add_table(placed_table(name, TableKind::Table, -1.0, -1.0))
                .unwrap();
        }
        for dim in ["dim_a", "dim_b", "dim_c"] {
            p.add_join(JoinEdge::new("fact", format!("{}_id", dim), dim, "id"))
                .unwrap();
        }
        p
    }

    #[test]
    fn test_layout_bit_identical_across_runs() {
        for col_priority in [false, true] {
            let layout = PhysicalGraphLayout::new(LayoutConfig {
                col_priority,
                ..LayoutConfig::default()
            });
            let mut first = star_partition();
            let mut second = star_partition();
            layout.layout(&mut first);
            layout.layout(&mut second);
            let a: Vec<Bounds> = first.tables.iter().map(|t| t.bounds).collect();
            let b: Vec<Bounds> = second.tables.iter().map(|t| t.bounds).collect();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_star_schema_levels() {
        let layout = PhysicalGraphLayout::new(LayoutConfig::default());
        let mut p = star_partition();
        layout.layout(&mut p);
        // fact has no incoming join edge: level 0.
        assert_eq!(p.table("fact").unwrap().bounds.x, 0.0);
        for dim in ["dim_a", "dim_b", "dim_c"] {
            assert_eq!(p.table(dim).unwrap().bounds.x, 260.0);
        }
        // Unjoined table lands on the overflow level.
        assert_eq!(p.table("loose").unwrap().bounds.x, 520.0);
    }

    #[test]
    fn test_no_two_connected_tables_share_a_position() {
        let layout = PhysicalGraphLayout::new(LayoutConfig::default());
        let mut p = star_partition();
        layout.layout(&mut p);
        let mut positions: Vec<(u64, u64)> = p
            .tables
            .iter()
            .map(|t| (t.bounds.x.to_bits(), t.bounds.y.to_bits()))
            .collect();
        positions.sort_unstable();
        positions.dedup();
        assert_eq!(positions.len(), p.tables.len());
    }
}
