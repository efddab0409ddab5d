// Table definitions kept in sync with DbContext::init_schema.

diesel::table! {
    users (id) {
        id -> Text,
        email -> Text,
        name -> Text,
        created_at -> Text,
    }
}

diesel::table! {
    assets (id) {
        id -> Text,
        name -> Text,
        asset_type -> Text,
        description -> Text,
        serial_no -> Text,
        code -> Text,
        purchased -> Nullable<Text>,
        added_by -> Nullable<Text>,
        assigned_to -> Nullable<Text>,
        return_date -> Nullable<Text>,
        lost -> Integer,
        created_at -> Text,
    }
}

diesel::allow_tables_to_appear_in_same_query!(users, assets);
