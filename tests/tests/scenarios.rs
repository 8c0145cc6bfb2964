//! The five reference scenarios, end to end through a domain.

use fixity_tests::prelude::*;

fn domain() -> Domain {
    let mut domain = Domain::with_tag(1);
    for id in 1..=6 {
        domain.add_node(NodeId::new(id), 3);
    }
    domain
}

mod create_and_fix {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_fixity_in_new_hypothesis() {
        // GIVEN
        let mut domain = domain();
        domain.create_hypothesis("H1").unwrap();

        // WHEN
        let tag = domain
            .add_hypothesis_fixity("H1", DofRef::new(NodeId::new(5), 2), 0.0, PatternTag::new(1))
            .unwrap();

        // THEN
        let h1 = domain.hypotheses().find_by_name("H1").unwrap();
        assert_eq!(h1.count_single_freedom(), 1);
        let sp = h1.get(tag).unwrap();
        assert!(sp.is_homogeneous());
        assert_eq!(sp.node(), NodeId::new(5));
        assert_eq!(sp.dof_index(), 2);
        assert_eq!(sp.pattern(), PatternTag::new(1));
    }
}

mod idempotent_creation {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_second_create_returns_original() {
        // GIVEN
        let mut domain = domain();
        let first = domain.create_hypothesis("H1").unwrap();
        domain
            .add_hypothesis_fixity("H1", DofRef::new(NodeId::new(5), 2), 0.0, PatternTag::new(1))
            .unwrap();

        // WHEN
        let second = domain.create_hypothesis("H1").unwrap();

        // THEN
        assert_eq!(first, second);
        assert_eq!(domain.hypotheses().len(), 1);
        assert_eq!(
            domain.hypotheses().find_by_name("H1").unwrap().count_single_freedom(),
            1
        );
    }
}

mod registry_transfer {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_two_hypotheses_into_empty_registry() {
        // GIVEN
        let nodes = grid_nodes(4);
        let source = registry_with(&nodes, &[("H1", 3), ("H2", 1)]);
        let mut channel = MemoryChannel::new();
        let peer = PeerTag::new(7);

        // WHEN
        send_self(&source, &mut channel, peer).unwrap();
        let mut target = HypothesisRegistry::new();
        let report = recv_self(&mut target, &mut channel, peer).unwrap();

        // THEN
        assert!(report.is_complete());
        assert_eq!(target.len(), 2);
        assert_eq!(target.names().collect::<Vec<_>>(), vec!["H1", "H2"]);
        assert_eq!(target.find_by_name("H1").unwrap().count_single_freedom(), 3);
        assert_eq!(target.find_by_name("H2").unwrap().count_single_freedom(), 1);
    }
}

mod lookup_miss {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_unknown_tag_in_empty_container() {
        let domain = domain();

        assert!(domain.constraints().get(ConstraintTag::new(999)).is_none());
        assert!(domain.constraints().is_empty());
        assert_eq!(domain.bookkeeping().detach_count(), 0);
    }
}

mod remove_current {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_current_cleared_and_detached_once() {
        // GIVEN
        let mut domain = domain();
        domain.create_hypothesis("H1").unwrap();
        domain.create_hypothesis("H2").unwrap();
        assert!(domain.set_current_hypothesis("H1"));

        // WHEN
        assert!(domain.remove_hypothesis("H1"));

        // THEN
        assert!(domain.current_hypothesis().is_none());
        assert_eq!(domain.bookkeeping().detached(), &["H1".to_string()]);
        assert!(domain.hypotheses().find_by_name("H2").is_some());
    }

    #[test]
    fn test_removing_again_is_a_logged_noop() {
        let mut domain = domain();
        domain.create_hypothesis("H1").unwrap();
        domain.remove_hypothesis("H1");

        assert!(!domain.remove_hypothesis("H1"));
        assert_eq!(domain.bookkeeping().detach_count(), 1);
    }
}
