//! Decimal 字段的宽容 serde
//!
//! DRF 的 DecimalField 默认把金额序列化成字符串（`"45000.00"`），
//! 旧版接口又有直接给 JSON number 的。反序列化两种形态都收，
//! 序列化统一输出 number。
//!
//! 用法：`#[serde(with = "num")]` / `#[serde(with = "num::opt")]`。

use serde::{Deserialize, Deserializer, Serializer};

/// 线上两种形态的中间表示
#[derive(Deserialize)]
#[serde(untagged)]
enum Decimal {
    Number(f64),
    Text(String),
}

impl Decimal {
    fn into_f64<E: serde::de::Error>(self) -> Result<f64, E> {
        match self {
            Decimal::Number(n) => Ok(n),
            Decimal::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| E::custom(format!("valor decimal inválido: {s:?}"))),
        }
    }
}

pub fn serialize<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_f64(*value)
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Decimal::deserialize(deserializer)?.into_f64()
}

/// `Option<f64>` 版本：`null` 与字段缺失都按 `None`
pub mod opt {
    use serde::{Deserialize, Deserializer, Serializer};

    use super::Decimal;

    pub fn serialize<S>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(v) => serializer.serialize_f64(*v),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<Decimal>::deserialize(deserializer)? {
            Some(raw) => raw.into_f64().map(Some),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Montos {
        #[serde(with = "crate::num")]
        total: f64,
        #[serde(default, with = "crate::num::opt")]
        envio: Option<f64>,
    }

    #[test]
    fn decimal_strings_and_numbers_both_parse() {
        let m: Montos = serde_json::from_value(json!({
            "total": "45000.00",
            "envio": 1500,
        }))
        .unwrap();
        assert_eq!(m.total, 45000.0);
        assert_eq!(m.envio, Some(1500.0));
    }

    #[test]
    fn null_and_missing_are_none() {
        let m: Montos = serde_json::from_value(json!({ "total": 10, "envio": null })).unwrap();
        assert_eq!(m.envio, None);

        let m: Montos = serde_json::from_value(json!({ "total": "9.50" })).unwrap();
        assert_eq!(m.total, 9.5);
        assert_eq!(m.envio, None);
    }

    #[test]
    fn garbage_string_is_an_error() {
        let result = serde_json::from_value::<Montos>(json!({ "total": "gratis" }));
        assert!(result.is_err());
    }
}
