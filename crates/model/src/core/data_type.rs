use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, fmt};

/// Source engine column types, identified on the wire by their type OID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DataType {
    Boolean,
    Bytea,
    Bigint,
    Smallint,
    Integer,
    Text,
    Real,
    Float8,
    Bpchar,
    Varchar,
    Date,
    Time,
    Timestamp,
    TimestampWithTimeZone,
    Numeric,
    Uuid,

    BoolArray,
    ByteaArray,
    Int2Array,
    Int4Array,
    Int8Array,
    TextArray,
    Float4Array,
    Float8Array,
    BpcharArray,
    VarcharArray,
    DateArray,
    TimeArray,
    TimestampArray,
    TimestampTzArray,
    NumericArray,
    UuidArray,
}

lazy_static! {
    static ref OID_MAP: HashMap<i32, DataType> = build_oid_map();
    static ref TYPE_NAME_MAP: HashMap<&'static str, DataType> = build_type_name_map();
}

impl DataType {
    pub fn from_oid(oid: i32) -> Option<Self> {
        OID_MAP.get(&oid).copied()
    }

    /// Resolves a catalog type name such as `int4`, `varchar` or `_int8`.
    pub fn from_type_name(type_name: &str) -> Result<Self, String> {
        let normalized = type_name.trim().to_lowercase();
        TYPE_NAME_MAP
            .get(normalized.as_str())
            .copied()
            .ok_or_else(|| format!("Unknown column type: {type_name}"))
    }

    pub fn oid(&self) -> i32 {
        use DataType::*;
        match self {
            Boolean => 16,
            Bytea => 17,
            Bigint => 20,
            Smallint => 21,
            Integer => 23,
            Text => 25,
            Real => 700,
            Float8 => 701,
            Bpchar => 1042,
            Varchar => 1043,
            Date => 1082,
            Time => 1083,
            Timestamp => 1114,
            TimestampWithTimeZone => 1184,
            Numeric => 1700,
            Uuid => 2950,
            BoolArray => 1000,
            ByteaArray => 1001,
            Int2Array => 1005,
            Int4Array => 1007,
            Int8Array => 1016,
            TextArray => 1009,
            Float4Array => 1021,
            Float8Array => 1022,
            BpcharArray => 1014,
            VarcharArray => 1015,
            DateArray => 1182,
            TimeArray => 1183,
            TimestampArray => 1115,
            TimestampTzArray => 1185,
            NumericArray => 1231,
            UuidArray => 2951,
        }
    }

    /// Element type of an array type, `None` for scalar types.
    pub fn type_elem(&self) -> Option<DataType> {
        use DataType::*;
        match self {
            BoolArray => Some(Boolean),
            ByteaArray => Some(Bytea),
            Int2Array => Some(Smallint),
            Int4Array => Some(Integer),
            Int8Array => Some(Bigint),
            TextArray => Some(Text),
            Float4Array => Some(Real),
            Float8Array => Some(Float8),
            BpcharArray => Some(Bpchar),
            VarcharArray => Some(Varchar),
            DateArray => Some(Date),
            TimeArray => Some(Time),
            TimestampArray => Some(Timestamp),
            TimestampTzArray => Some(TimestampWithTimeZone),
            NumericArray => Some(Numeric),
            UuidArray => Some(Uuid),
            _ => None,
        }
    }

    pub fn is_array(&self) -> bool {
        self.type_elem().is_some()
    }

    pub fn name(&self) -> &'static str {
        use DataType::*;
        match self {
            Boolean => "bool",
            Bytea => "bytea",
            Bigint => "int8",
            Smallint => "int2",
            Integer => "int4",
            Text => "text",
            Real => "float4",
            Float8 => "float8",
            Bpchar => "bpchar",
            Varchar => "varchar",
            Date => "date",
            Time => "time",
            Timestamp => "timestamp",
            TimestampWithTimeZone => "timestamptz",
            Numeric => "numeric",
            Uuid => "uuid",
            BoolArray => "_bool",
            ByteaArray => "_bytea",
            Int2Array => "_int2",
            Int4Array => "_int4",
            Int8Array => "_int8",
            TextArray => "_text",
            Float4Array => "_float4",
            Float8Array => "_float8",
            BpcharArray => "_bpchar",
            VarcharArray => "_varchar",
            DateArray => "_date",
            TimeArray => "_time",
            TimestampArray => "_timestamp",
            TimestampTzArray => "_timestamptz",
            NumericArray => "_numeric",
            UuidArray => "_uuid",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

const ALL_TYPES: [DataType; 32] = {
    use DataType::*;
    [
        Boolean,
        Bytea,
        Bigint,
        Smallint,
        Integer,
        Text,
        Real,
        Float8,
        Bpchar,
        Varchar,
        Date,
        Time,
        Timestamp,
        TimestampWithTimeZone,
        Numeric,
        Uuid,
        BoolArray,
        ByteaArray,
        Int2Array,
        Int4Array,
        Int8Array,
        TextArray,
        Float4Array,
        Float8Array,
        BpcharArray,
        VarcharArray,
        DateArray,
        TimeArray,
        TimestampArray,
        TimestampTzArray,
        NumericArray,
        UuidArray,
    ]
};

fn build_oid_map() -> HashMap<i32, DataType> {
    ALL_TYPES.iter().map(|t| (t.oid(), *t)).collect()
}

fn build_type_name_map() -> HashMap<&'static str, DataType> {
    use DataType::*;

    let aliases = [
        ("boolean", Boolean),
        ("bigint", Bigint),
        ("smallint", Smallint),
        ("integer", Integer),
        ("int", Integer),
        ("real", Real),
        ("double precision", Float8),
        ("character", Bpchar),
        ("char", Bpchar),
        ("character varying", Varchar),
        ("timestamp without time zone", Timestamp),
        ("timestamp with time zone", TimestampWithTimeZone),
        ("time without time zone", Time),
        ("decimal", Numeric),
    ];

    let mut map: HashMap<&'static str, DataType> =
        ALL_TYPES.iter().map(|t| (t.name(), *t)).collect();
    for (name, data_type) in aliases {
        map.insert(name, data_type);
    }
    map
}
