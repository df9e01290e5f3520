//! Store lifecycles against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then drives every store of a
//! `Dashboard` over real HTTP using `UreqTransport`. Validates that request
//! building, write shapes, response parsing and refetch-after-write work
//! end-to-end with the actual server.

use dashboard_core::entities::category::{self, SubcategoryForm};
use dashboard_core::entities::{
    CategoryForm, EmployeeForm, EmployeePatch, Ingredient, NewRole, ProductForm, RolePatch, SupplyForm,
};
use dashboard_core::{ApiError, Dashboard, DashboardConfig, ModalMode, StoreError};

fn start_mock_server() -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

fn dashboard() -> Dashboard {
    let base_url = start_mock_server();
    Dashboard::from_config(&DashboardConfig::new(base_url))
}

#[test]
fn employee_lifecycle() {
    let mut dash = dashboard();
    let store = &mut dash.employees;

    // Step 1: empty list.
    store.fetch_all().unwrap();
    assert!(store.items().is_empty());

    // Step 2: create through the modal; the refetch brings the row in.
    store.open_modal(ModalMode::Create);
    let draft = EmployeeForm {
        first_name: " Ana ".to_string(),
        last_name: "García".to_string(),
        email: "ana@resto.com".to_string(),
        dni: "30111222".to_string(),
    }
    .prepare()
    .unwrap();
    store.create(&draft).unwrap();
    assert!(!store.modal().open);
    assert_eq!(store.items().len(), 1);
    let ana = store.items()[0].clone();
    assert_eq!(ana.first_name, "Ana");

    // Step 3: a partial patch keeps every other field.
    store.select(Some(ana.clone()));
    store.open_modal(ModalMode::Edit);
    let patch = EmployeePatch {
        email: Some("ana.garcia@resto.com".to_string()),
        ..EmployeePatch::default()
    };
    store.update(ana.id, &patch).unwrap();
    assert!(store.selected().is_none());
    let updated = store.find(ana.id).unwrap();
    assert_eq!(updated.email, "ana.garcia@resto.com");
    assert_eq!(updated.first_name, "Ana");
    assert_eq!(updated.dni, "30111222");

    // Step 4: unknown id fails locally.
    let err = store.update(999, &patch).unwrap_err();
    assert!(matches!(err, StoreError::EntityNotFound { id: 999, .. }));

    // Step 5: delete, then the refetch drops the row.
    store.delete(ana.id).unwrap();
    assert!(store.items().is_empty());

    // Step 6: deleting again surfaces the server's 404.
    let err = store.delete(ana.id).unwrap_err();
    assert!(matches!(err, StoreError::Write(ApiError::NotFound)));
    assert!(store.error().is_some());
}

#[test]
fn soft_deleted_roles_disappear_from_the_store() {
    let mut dash = dashboard();
    let store = &mut dash.roles;

    store.create(&NewRole::new("cajero", Some("Caja")).unwrap()).unwrap();
    store.create(&NewRole::new("cocinero", None).unwrap()).unwrap();
    assert_eq!(store.items().len(), 2);

    let cashier = store.items().iter().find(|r| r.name == "cajero").unwrap().id;
    let patch = RolePatch {
        description: Some("Caja y cobros".to_string()),
        ..RolePatch::default()
    };
    store.update(cashier, &patch).unwrap();
    assert_eq!(
        store.find(cashier).unwrap().description.as_deref(),
        Some("Caja y cobros")
    );

    store.delete(cashier).unwrap();
    assert_eq!(store.items().len(), 1);
    assert!(store.find(cashier).is_none());
}

#[test]
fn categories_flatten_after_refetch() {
    let mut dash = dashboard();

    dash.categories.fetch_all().unwrap();
    let draft = CategoryForm {
        name: "Bebidas".to_string(),
        is_supply: false,
    }
    .prepare()
    .unwrap();
    dash.categories.create(&draft).unwrap();

    let rows = dash.flat_categories();
    let drinks = rows.iter().find(|r| r.name == "Bebidas").unwrap().id;
    let sub = SubcategoryForm {
        name: "Gaseosas".to_string(),
        is_supply: false,
        parent_id: Some(drinks),
    }
    .prepare(&rows)
    .unwrap();
    dash.categories.create(&sub).unwrap();

    let rows = dash.flat_categories();
    let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Insumos", "Bebidas", "Gaseosas"]);
    assert!(category::supplies_category(&rows).is_some());

    // Deleting the subcategory only flags it; the flat view drops it.
    let soda = rows.iter().find(|r| r.name == "Gaseosas").unwrap().id;
    dash.categories.delete(soda).unwrap();
    assert_eq!(dash.flat_categories().len(), 2);
}

#[test]
fn supplies_and_products_round_trip_their_write_shapes() {
    let mut dash = dashboard();
    dash.refresh_all().unwrap();

    // A supply for elaboration lands in "Insumos" at purchase price.
    let rows = dash.flat_categories();
    let kilo = dash.units.items().iter().find(|u| u.name == "Kilogramo").unwrap().id;
    let flour = SupplyForm {
        name: "Harina 000".to_string(),
        unit_id: Some(kilo),
        purchase_price: 800.0,
        sale_price: 5000.0,
        stock: 24,
        min_stock: 5,
        for_elaboration: true,
        ..SupplyForm::default()
    }
    .prepare(&rows, dash.units.items())
    .unwrap();
    dash.supplies.create(&flour).unwrap();

    let stored = dash.supplies.items()[0].clone();
    assert_eq!(stored.category.name, "Insumos");
    assert_eq!(stored.unit.name, "Kilogramo");
    assert_eq!(stored.sale_price, 800.0);
    assert_eq!(dash.ingredients().len(), 1);

    // A product using it as an ingredient.
    dash.categories
        .create(
            &CategoryForm {
                name: "Pizzas".to_string(),
                is_supply: false,
            }
            .prepare()
            .unwrap(),
        )
        .unwrap();
    let rows = dash.flat_categories();
    let pizzas = rows.iter().find(|r| r.name == "Pizzas").unwrap().id;
    let draft = ProductForm {
        name: "Muzzarella".to_string(),
        description: "Pizza clásica".to_string(),
        sale_price: 9000.0,
        category_id: Some(pizzas),
        estimated_minutes: 25,
        preparation: "Hornear 12 minutos".to_string(),
        ingredients: vec![Ingredient {
            supply_id: stored.id,
            quantity: 0.5,
        }],
    }
    .prepare(&rows, dash.supplies.items())
    .unwrap();
    dash.products.create(&draft).unwrap();

    let product = dash.products.items()[0].clone();
    assert_eq!(product.category.name, "Pizzas");
    assert_eq!(product.details.len(), 1);
    assert_eq!(product.details[0].supply.name, "Harina 000");

    // Discontinuing removes it from the list.
    dash.products.delete(product.id).unwrap();
    assert!(dash.products.items().is_empty());
}
