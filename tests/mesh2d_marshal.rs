use meshkernel_marshal::prelude::*;
use proptest::prelude::*;

fn unit_square() -> Mesh2d {
    Mesh2d::new(
        [0.0, 1.0, 1.0, 0.0],
        [0.0, 0.0, 1.0, 1.0],
        [0, 1, 1, 2, 2, 3, 3, 0],
    )
    .with_faces([0, 1, 2, 3], [4])
    .with_edge_centers([0.5, 1.0, 0.5, 0.0], [0.0, 0.5, 1.0, 0.5])
    .with_face_centers([0.5], [0.5])
}

#[test]
fn unit_square_counts_and_values() -> Result<(), MarshalError> {
    let mesh = unit_square();
    let flat = to_flat(&mesh)?;
    let rec = flat.record();

    assert_eq!(rec.num_nodes, 4);
    assert_eq!(rec.num_edges, 4);
    assert_eq!(rec.num_faces, 1);
    assert_eq!(rec.num_face_nodes, 4);

    unsafe {
        assert_eq!(rec.node_x(), &[0.0, 1.0, 1.0, 0.0]);
        assert_eq!(rec.node_y(), &[0.0, 0.0, 1.0, 1.0]);
        assert_eq!(rec.edge_nodes(), &[0, 1, 1, 2, 2, 3, 3, 0]);
        assert_eq!(rec.face_nodes(), &[0, 1, 2, 3]);
        assert_eq!(rec.nodes_per_face(), &[4]);
        assert_eq!(rec.edge_x(), mesh.edge_x());
        assert_eq!(rec.edge_y(), mesh.edge_y());
        assert_eq!(rec.face_x(), &[0.5]);
        assert_eq!(rec.face_y(), &[0.5]);
    }
    Ok(())
}

#[test]
fn view_pointer_addresses_record() -> Result<(), MarshalError> {
    let mesh = unit_square();
    let flat = to_flat(&mesh)?;
    let ptr = flat.as_ptr();
    let rec = unsafe { &*ptr };
    assert_eq!(rec.num_nodes, 4);
    assert_eq!(rec.node_x.cast_const(), mesh.node_x().as_ptr());
    Ok(())
}

#[test]
fn empty_mesh_has_zero_counts_and_non_null_pointers() -> Result<(), MarshalError> {
    let mesh = Mesh2d::default();
    let flat = to_flat(&mesh)?;
    let rec = flat.record();

    assert_eq!(
        [rec.num_nodes, rec.num_edges, rec.num_faces, rec.num_face_nodes],
        [0, 0, 0, 0]
    );
    let int_ptrs = [rec.edge_nodes, rec.face_nodes, rec.nodes_per_face];
    let dbl_ptrs = [
        rec.node_x, rec.node_y, rec.edge_x, rec.edge_y, rec.face_x, rec.face_y,
    ];
    assert!(int_ptrs.iter().all(|p| !p.is_null()));
    assert!(dbl_ptrs.iter().all(|p| !p.is_null()));
    Ok(())
}

#[test]
fn odd_edge_array_is_truncated_not_rejected() -> Result<(), MarshalError> {
    let mesh = Mesh2d::new([0.0, 1.0, 2.0], [0.0, 0.0, 0.0], [0, 1, 1, 2, 2]);
    let flat = to_flat(&mesh)?;
    assert_eq!(flat.record().num_edges, 2);
    unsafe {
        assert_eq!(flat.record().edge_nodes(), &[0, 1, 1, 2]);
    }
    Ok(())
}

#[test]
fn marshalling_does_not_touch_host() -> Result<(), MarshalError> {
    let mesh = unit_square();
    let before = mesh.clone();
    {
        let _flat = to_flat(&mesh)?;
    }
    assert_eq!(mesh, before);
    Ok(())
}

#[test]
fn in_place_update_through_mutable_view() -> Result<(), MarshalError> {
    let mut mesh = unit_square();
    {
        let mut flat = to_flat_mut(&mut mesh)?;
        let rec = unsafe { &mut *flat.as_mut_ptr() };
        let n = rec.num_nodes as usize;
        let xs = unsafe { std::slice::from_raw_parts_mut(rec.node_x, n) };
        for x in xs.iter_mut() {
            *x *= 2.0;
        }
    }
    assert_eq!(mesh.node_x(), &[0.0, 2.0, 2.0, 0.0]);
    Ok(())
}

#[test]
fn mesh_without_centers_reads_back_every_field() -> Result<(), MarshalError> {
    let mesh = Mesh2d::new(
        [0.0, 1.0, 1.0, 0.0],
        [0.0, 0.0, 1.0, 1.0],
        [0, 1, 1, 2, 2, 3, 3, 0],
    )
    .with_faces([0, 1, 2, 3], [4]);
    assert!(mesh.validate_invariants().is_ok());

    let flat = to_flat(&mesh)?;
    assert_eq!(flat.record().num_edges, 4);
    assert_eq!(flat.record().num_faces, 0);
    assert_eq!(flat.record().edge_x.cast_const(), mesh.edge_x().as_ptr());

    assert_eq!(flat.node_x(), mesh.node_x());
    assert_eq!(flat.node_y(), mesh.node_y());
    assert_eq!(flat.edge_nodes(), mesh.edge_nodes());
    assert_eq!(flat.face_nodes(), &[0, 1, 2, 3]);
    assert_eq!(flat.nodes_per_face(), &[4]);
    assert!(flat.edge_x().is_empty());
    assert!(flat.edge_y().is_empty());
    assert!(flat.face_x().is_empty());
    assert!(flat.face_y().is_empty());
    Ok(())
}

#[derive(Debug, Clone)]
struct RandomMesh {
    xs: Vec<f64>,
    ys: Vec<f64>,
    edges: Vec<i32>,
    faces: Vec<Vec<i32>>,
    keep_faces: bool,
    edge_centers: bool,
    face_centers: bool,
}

fn random_mesh() -> impl Strategy<Value = RandomMesh> {
    (0usize..24).prop_flat_map(|n| {
        let idx = if n == 0 {
            Just(INT_MISSING_VALUE).boxed()
        } else {
            prop_oneof![4 => 0..n as i32, 1 => Just(INT_MISSING_VALUE)].boxed()
        };
        (
            prop::collection::vec(-1e6f64..1e6, n),
            prop::collection::vec(-1e6f64..1e6, n),
            prop::collection::vec(idx.clone(), 0..20).prop_map(|mut v| {
                if v.len() % 2 == 1 {
                    v.pop();
                }
                v
            }),
            prop::collection::vec(prop::collection::vec(idx, 3..6), 0..8),
            any::<(bool, bool, bool)>(),
        )
            .prop_map(
                |(xs, ys, edges, faces, (keep_faces, edge_centers, face_centers))| RandomMesh {
                    xs,
                    ys,
                    edges,
                    faces,
                    keep_faces,
                    edge_centers,
                    face_centers,
                },
            )
    })
}

impl RandomMesh {
    fn build(&self) -> Mesh2d {
        let mut mesh = Mesh2d::new(self.xs.clone(), self.ys.clone(), self.edges.clone());
        if self.keep_faces {
            let face_nodes: Vec<i32> = self.faces.iter().flatten().copied().collect();
            let nodes_per_face: Vec<i32> =
                self.faces.iter().map(|f| f.len() as i32).collect();
            mesh = mesh.with_faces(face_nodes, nodes_per_face);
        }
        if self.edge_centers {
            let centers: Vec<f64> = (0..self.edges.len() / 2).map(|i| i as f64).collect();
            mesh = mesh.with_edge_centers(centers.clone(), centers);
        }
        if self.face_centers {
            let centers: Vec<f64> = (0..self.faces.len()).map(|i| i as f64 + 0.5).collect();
            mesh = mesh.with_face_centers(centers.clone(), centers);
        }
        mesh
    }
}

proptest! {
    #[test]
    fn flat_view_reproduces_host_bytes(m in random_mesh()) {
        let mesh = m.build();
        prop_assert!(mesh.validate_invariants().is_ok());

        let flat = to_flat(&mesh).unwrap();
        let rec = flat.record();
        prop_assert_eq!(rec.num_nodes as usize, mesh.node_x().len());
        prop_assert_eq!(rec.num_edges as usize, mesh.edge_nodes().len() / 2);
        prop_assert_eq!(rec.num_faces as usize, mesh.face_x().len());
        prop_assert_eq!(rec.num_face_nodes as usize, mesh.face_nodes().len());

        prop_assert_eq!(
            bytemuck::cast_slice::<f64, u8>(flat.node_x()),
            bytemuck::cast_slice::<f64, u8>(mesh.node_x())
        );
        prop_assert_eq!(
            bytemuck::cast_slice::<f64, u8>(flat.node_y()),
            bytemuck::cast_slice::<f64, u8>(mesh.node_y())
        );
        prop_assert_eq!(flat.edge_nodes(), mesh.edge_nodes());
        prop_assert_eq!(flat.face_nodes(), mesh.face_nodes());
        prop_assert_eq!(flat.nodes_per_face(), mesh.nodes_per_face());
        prop_assert_eq!(flat.edge_x(), mesh.edge_x());
        prop_assert_eq!(flat.edge_y(), mesh.edge_y());
        prop_assert_eq!(flat.face_x(), mesh.face_x());
        prop_assert_eq!(flat.face_y(), mesh.face_y());
    }
}
