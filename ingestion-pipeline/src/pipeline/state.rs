use state_machines::state_machine;

state_machine! {
    name: CatalogMachine,
    state: CatalogState,
    initial: Ready,
    states: [Ready, Cleared, CategoriesIngested, SubcategoriesIngested, ProductsIngested, Failed],
    events {
        clear { transition: { from: Ready, to: Cleared } }
        categories { transition: { from: Cleared, to: CategoriesIngested } }
        subcategories { transition: { from: CategoriesIngested, to: SubcategoriesIngested } }
        products { transition: { from: SubcategoriesIngested, to: ProductsIngested } }
        abort {
            transition: { from: Ready, to: Failed }
            transition: { from: Cleared, to: Failed }
            transition: { from: CategoriesIngested, to: Failed }
            transition: { from: SubcategoriesIngested, to: Failed }
            transition: { from: ProductsIngested, to: Failed }
        }
    }
}

pub fn ready() -> CatalogMachine<(), Ready> {
    CatalogMachine::new(())
}
