//! Field labels, placeholders, and fixed replies.

pub(super) fn lookup(key: &str, lang: &str) -> Option<&'static str> {
    let s = match key {
        // --- Field labels ---
        "label_code" => match lang {
            "Vietnamese" => "🏷️ Mã",
            _ => "🏷️ Code",
        },
        "label_name" => match lang {
            "Vietnamese" => "📛 Tên",
            _ => "📛 Name",
        },
        "label_location" => match lang {
            "Vietnamese" => "📍 Vị trí",
            _ => "📍 Location",
        },
        "label_quantity" => match lang {
            "Vietnamese" => "🔢 Số lượng",
            _ => "🔢 Quantity",
        },
        "label_weight" => match lang {
            "Vietnamese" => "⚖️ KL",
            _ => "⚖️ Weight",
        },
        "label_date_in" => match lang {
            "Vietnamese" => "📅 Ngày nhập",
            _ => "📅 Date in",
        },
        "label_storage_age" => match lang {
            "Vietnamese" => "⏳ Thời gian lưu",
            _ => "⏳ Storage age",
        },
        "label_remark" => match lang {
            "Vietnamese" => "💬 Ghi chú",
            _ => "💬 Remark",
        },

        // --- Placeholders ---
        "placeholder" => match lang {
            "Vietnamese" => "Không có",
            _ => "n/a",
        },
        "no_remark" => match lang {
            "Vietnamese" => "Không có",
            _ => "none",
        },
        "age_unknown" => match lang {
            "Vietnamese" => "Không xác định",
            _ => "unknown",
        },
        "age_no_date" => match lang {
            "Vietnamese" => "Không có dữ liệu ngày nhập",
            _ => "no intake date",
        },

        // --- Fixed replies ---
        "test_ok" => match lang {
            "Vietnamese" => "✅ Bot kho nguyên liệu đang hoạt động.",
            _ => "✅ Stock bot is up and running.",
        },
        "data_unavailable" => match lang {
            "Vietnamese" => {
                "❌ Không đọc được dữ liệu kho. Vui lòng kiểm tra lại hoặc thử lại sau."
            }
            _ => "❌ Inventory data is unavailable right now. Please try again later.",
        },
        "list_empty" => match lang {
            "Vietnamese" => "📋 Kho chưa có mã nào.",
            _ => "📋 The inventory has no codes yet.",
        },
        _ => return None,
    };
    Some(s)
}
