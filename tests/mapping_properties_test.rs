use ethos_crm_sync::{map_account, map_contact, CrmEntity, MappingOptions};
use serde_json::json;

fn options() -> MappingOptions {
    MappingOptions::new("https://crm.ethos.org.br")
}

#[test]
fn test_account_without_revenue_is_small() {
    let record = map_account(&CrmEntity::new("a"), &options());
    assert_eq!(record.get_str("faturamento_anual"), "small");
    assert_eq!(record.get_str("porte"), "micro");
}

#[test]
fn test_revenue_bracket_boundaries() {
    for (revenue, bracket) in [
        (9_999_999_i64, "small"),
        (10_000_000, "medium"),
        (299_999_999, "medium"),
        (300_000_000, "large"),
    ] {
        let entity = CrmEntity::new("a").with_attribute("revenue_base", json!(revenue));
        assert_eq!(
            map_account(&entity, &options()).get_str("faturamento_anual"),
            bracket
        );
    }
}

#[test]
fn test_street_type_prefix() {
    let already_prefixed = CrmEntity::new("a")
        .with_attribute("fut_address1_logradouro", json!("Rua das Flores"))
        .with_attribute("fut_lk_tipologradouro", json!({"Id": "1", "Name": "Rua"}));
    assert_eq!(
        map_account(&already_prefixed, &options()).get_str("end_logradouro"),
        "Rua das Flores"
    );

    let bare = CrmEntity::new("a")
        .with_attribute("fut_address1_logradouro", json!("Paulista"))
        .with_attribute("fut_lk_tipologradouro", json!({"Id": "2", "Name": "Av"}));
    assert_eq!(
        map_account(&bare, &options()).get_str("end_logradouro"),
        "Av Paulista"
    );
}

#[test]
fn test_contact_phones_and_role() {
    let entity = CrmEntity::new("c")
        .with_attribute("mobilephone", json!(""))
        .with_attribute("telephone1", json!("11999998888"))
        .with_attribute("telephone2", json!("11999998888"))
        .with_attribute("fut_bt_financeiro", json!(1));

    let record = map_contact(&entity, &options());
    assert_eq!(record.get_str("celular"), "11999998888");
    assert_eq!(record.get_str("telefone"), "");
    assert_eq!(record.get_str("_pmpro_role"), "financial");

    let record = map_contact(&CrmEntity::new("c"), &options());
    assert_eq!(record.get_str("_pmpro_role"), "primary");
}

#[test]
fn test_leftover_reference_and_empty_values() {
    let entity = CrmEntity::new("c")
        .with_attribute("ownerid", json!({"Id": "u-1", "Name": "Equipe CRM"}))
        .with_attribute("nickname", json!(""));

    let record = map_contact(&entity, &options());
    let owner: serde_json::Value =
        serde_json::from_str(record.get_str("_ethos_crm:ownerid")).unwrap();
    assert_eq!(owner, json!({"Id": "u-1", "Name": "Equipe CRM"}));
    assert!(!record.contains_key("_ethos_crm:nickname"));
}
