//! # PD Control Benchmark

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use comms_if::drive::PidInput;
use pd_ctrl_lib::{
    node::WallFollowNode,
    pd_ctrl::{calc_drive_param, Params, PdCtrl},
};

fn pd_ctrl_benchmark(c: &mut Criterion) {
    let params = Params::default();

    // Error sweep covering saturated and unsaturated steering
    let errors: Vec<f64> = (0..1000).map(|i| (i as f64 - 500.0) * 0.02).collect();

    c.bench_function("calc_drive_param", |b| {
        b.iter(|| {
            let mut prev_error = 0.0;
            for e in errors.iter() {
                black_box(calc_drive_param(black_box(*e), prev_error, &params));
                prev_error = *e;
            }
        })
    });

    c.bench_function("node_handle_sample", |b| {
        b.iter(|| {
            let mut node =
                WallFollowNode::new(PdCtrl::new(params.clone()), Vec::with_capacity(errors.len()));
            for e in errors.iter() {
                black_box(node.handle_sample(&PidInput::new(*e)).0);
            }
        })
    });
}

criterion_group!(benches, pd_ctrl_benchmark);
criterion_main!(benches);
