use criterion::{black_box, criterion_group, criterion_main, Criterion};

use licensehub_auth::{
    NavigationContext, ResourceRef, Role, User, build_ability, build_navigation, can_update_product,
    derive_permissions,
};
use licensehub_core::{UserId, VendorId};

fn staff_users() -> Vec<User> {
    let vendor = VendorId::new();
    Role::staff_roles()
        .into_iter()
        .map(|role| User::new(UserId::new(), role).with_vendor(vendor))
        .collect()
}

fn bench_derive_permissions(c: &mut Criterion) {
    let users = staff_users();
    c.bench_function("derive_permissions/staff_roles", |b| {
        b.iter(|| {
            for user in &users {
                black_box(derive_permissions(Some(black_box(user))));
            }
        })
    });
}

fn bench_build_ability(c: &mut Criterion) {
    let permissions = derive_permissions(Some(&User::new(UserId::new(), Role::Superuser)));
    c.bench_function("build_ability/superuser", |b| {
        b.iter(|| black_box(build_ability(black_box(&permissions))))
    });
}

fn bench_build_navigation(c: &mut Criterion) {
    let admin = User::new(UserId::new(), Role::Admin);
    let permissions = derive_permissions(Some(&admin));
    c.bench_function("build_navigation/admin", |b| {
        b.iter(|| {
            black_box(build_navigation(&NavigationContext {
                permissions: &permissions,
                current_user: Some(&admin),
                current_path: black_box("/dashboard/overview"),
            }))
        })
    });
}

fn bench_row_checks(c: &mut Criterion) {
    let vendor = VendorId::new();
    let owner = User::new(UserId::new(), Role::VendorAdmin).with_vendor(vendor);
    let rows: Vec<ResourceRef> = (0..100)
        .map(|i| {
            if i % 2 == 0 {
                ResourceRef::owned_by(vendor)
            } else {
                ResourceRef::owned_by(VendorId::new())
            }
        })
        .collect();

    c.bench_function("can_update_product/100_rows", |b| {
        b.iter(|| rows.iter().filter(|row| can_update_product(Some(&owner), Some(*row))).count())
    });
}

criterion_group!(
    benches,
    bench_derive_permissions,
    bench_build_ability,
    bench_build_navigation,
    bench_row_checks
);
criterion_main!(benches);
