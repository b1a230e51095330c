//! Validation order of the toolkit API: open → not running → node index → key.

use dd_core::UnitSystem;
use dd_project::{LATEST_VERSION, NodeDef, OpeningDef, OpeningKindDef, Project};
use dd_toolkit::{
    NodeParam, NodeResult, OpeningKind, OpeningParam, OpeningSpec, Toolkit, ToolkitError,
};

fn spec() -> OpeningSpec {
    OpeningSpec {
        kind: OpeningKind::Manhole,
        area: 1.0,
        width: 1.0,
        orifice_coeff: 0.167,
        free_weir_coeff: 0.54,
        submerged_weir_coeff: 0.056,
    }
}

fn project() -> Project {
    let junction = |id: &str| NodeDef {
        id: id.to_string(),
        invert_elev: 0.0,
        full_depth: 2.0,
        initial_depth: 0.0,
        coupling_area: 1.0,
        openings: vec![],
    };
    let mut j1 = junction("J1");
    j1.openings.push(OpeningDef {
        id: 0,
        kind: OpeningKindDef::Manhole,
        area: 25.0,
        width: 1.0,
        orifice_coeff: 0.167,
        free_weir_coeff: 0.54,
        submerged_weir_coeff: 0.056,
        closed: false,
    });
    Project {
        version: LATEST_VERSION,
        name: "guards".to_string(),
        units: UnitSystem::Si,
        nodes: vec![j1, junction("J2")],
    }
}

fn opened() -> Toolkit {
    let mut tk = Toolkit::new();
    tk.open(&project()).unwrap();
    tk
}

#[test]
fn model_not_open() {
    let mut tk = Toolkit::new();
    let not_open = Err(ToolkitError::NotOpen);

    assert_eq!(tk.node_index("J1"), Err(ToolkitError::NotOpen));
    assert_eq!(tk.node_count(), Err(ToolkitError::NotOpen));
    assert_eq!(tk.set_opening(0, 0, spec()), not_open);
    assert_eq!(tk.delete_opening(0, 0).map(|_| ()), not_open);
    assert_eq!(tk.delete_all_openings(0).map(|_| ()), not_open);
    assert_eq!(
        tk.get_opening_param(0, 0, OpeningParam::Area).map(|_| ()),
        not_open
    );
    assert_eq!(tk.get_opening_flow(0, 0).map(|_| ()), not_open);
    assert_eq!(tk.get_opening_kind(0, 0).map(|_| ()), not_open);
    assert_eq!(tk.get_opening_regime(0, 0).map(|_| ()), not_open);
    assert_eq!(tk.count_openings(0).map(|_| ()), not_open);
    assert_eq!(tk.list_opening_ids(0).map(|_| ()), not_open);
    assert_eq!(tk.is_node_coupled(0).map(|_| ()), not_open);
    assert_eq!(tk.close_opening(0, 0), not_open);
    assert_eq!(tk.open_opening(0, 0), not_open);
    assert_eq!(tk.couple_node(0, 1.0, 0.0).map(|_| ()), not_open);
    assert_eq!(tk.commit_step(), not_open);

    assert_eq!(ToolkitError::NotOpen.code(), 2001);
}

#[test]
fn structural_changes_rejected_while_running() {
    let mut tk = opened();
    tk.start().unwrap();

    // running is checked before the node index
    assert_eq!(tk.set_opening(100, 1, spec()), Err(ToolkitError::SimRunning));
    assert_eq!(tk.set_opening(0, 1, spec()), Err(ToolkitError::SimRunning));
    assert_eq!(tk.delete_opening(0, 0), Err(ToolkitError::SimRunning));
    assert_eq!(tk.delete_all_openings(0), Err(ToolkitError::SimRunning));
    assert_eq!(
        tk.set_node_param(0, NodeParam::FullDepth, 3.0),
        Err(ToolkitError::SimRunning)
    );
    assert_eq!(ToolkitError::SimRunning.code(), 2002);

    // queries and open/close still work mid-run
    assert_eq!(tk.count_openings(0), Ok(1));
    tk.close_opening(0, 0).unwrap();
    assert_eq!(tk.is_node_coupled(0), Ok(false));
    tk.open_opening(0, 0).unwrap();
    assert_eq!(tk.is_node_coupled(0), Ok(true));

    tk.end().unwrap();
    tk.set_opening(0, 1, spec()).unwrap();
    assert_eq!(tk.count_openings(0), Ok(2));
}

#[test]
fn node_index_out_of_range() {
    let mut tk = opened();
    let bad = Err(ToolkitError::NodeIndex {
        index: 100,
        count: 2,
    });

    assert_eq!(tk.set_opening(100, 0, spec()), bad);
    assert_eq!(
        tk.get_opening_param(100, 0, OpeningParam::Area).map(|_| ()),
        bad
    );
    assert_eq!(tk.get_opening_flow(100, 0).map(|_| ()), bad);
    assert_eq!(tk.get_opening_kind(100, 0).map(|_| ()), bad);
    assert_eq!(tk.get_opening_regime(100, 0).map(|_| ()), bad);
    assert_eq!(tk.count_openings(100).map(|_| ()), bad);
    assert_eq!(tk.list_opening_ids(100).map(|_| ()), bad);
    assert_eq!(tk.is_node_coupled(100).map(|_| ()), bad);
    assert_eq!(tk.close_opening(100, 0), bad);
    assert_eq!(tk.open_opening(100, 0), bad);
    assert_eq!(tk.delete_all_openings(100).map(|_| ()), bad);
    assert_eq!(tk.get_node_result(100, NodeResult::Depth).map(|_| ()), bad);
    assert_eq!(tk.couple_node(100, 1.0, 0.0).map(|_| ()), bad);

    assert_eq!(
        ToolkitError::NodeIndex {
            index: 100,
            count: 2
        }
        .code(),
        2004
    );
}

#[test]
fn opening_and_parameter_keys_out_of_range() {
    let mut tk = opened();
    let missing = Err(ToolkitError::OpeningIndex { node: 0, id: 100 });

    assert_eq!(
        tk.get_opening_param(0, 100, OpeningParam::Area).map(|_| ()),
        missing
    );
    assert_eq!(tk.get_opening_kind(0, 100).map(|_| ()), missing);
    assert_eq!(tk.get_opening_regime(0, 100).map(|_| ()), missing);
    assert_eq!(tk.get_opening_flow(0, 100).map(|_| ()), missing);
    assert_eq!(tk.close_opening(0, 100), missing);

    let key = OpeningParam::from_code(100).unwrap_err();
    assert_eq!(key.code(), 2000);
    assert_eq!(NodeParam::from_code(-1).unwrap_err().code(), 2000);
}

#[test]
fn degenerate_geometry_is_rejected_at_the_boundary() {
    let mut tk = opened();
    let mut bad = spec();
    bad.width = 0.0;
    let err = tk.set_opening(0, 5, bad).unwrap_err();
    assert!(matches!(err, ToolkitError::InvalidValue { .. }));
    assert_eq!(err.code(), 2000);
    assert_eq!(tk.count_openings(0), Ok(1));

    let mut bad = spec();
    bad.free_weir_coeff = -0.1;
    assert!(tk.set_opening(0, 5, bad).is_err());
}

#[test]
fn node_params_round_trip_in_model_units() {
    let mut tk = opened();
    assert_eq!(tk.node_index("J2"), Ok(1));
    assert!((tk.get_node_param(1, NodeParam::CouplingArea).unwrap() - 1.0).abs() < 1e-12);

    tk.set_node_param(1, NodeParam::CouplingArea, 4.0).unwrap();
    assert!((tk.get_node_param(1, NodeParam::CouplingArea).unwrap() - 4.0).abs() < 1e-12);

    tk.set_node_param(1, NodeParam::OverlandDepth, 0.3).unwrap();
    assert!((tk.get_node_param(1, NodeParam::OverlandDepth).unwrap() - 0.3).abs() < 1e-12);

    assert!(matches!(
        tk.set_node_param(1, NodeParam::FullDepth, -1.0),
        Err(ToolkitError::InvalidValue { .. })
    ));
}

#[test]
fn open_rejects_invalid_model() {
    let mut p = project();
    p.nodes[0].openings[0].width = -2.0;
    let mut tk = Toolkit::new();
    let err = tk.open(&p).unwrap_err();
    assert!(matches!(err, ToolkitError::Project(_)));
    assert!(!tk.is_open());
}
