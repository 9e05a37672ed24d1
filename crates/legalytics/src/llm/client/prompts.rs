//! Default LLM prompts for legal text analysis.

/// Default prompt for generating an insight about a passage of a regulation.
pub const DEFAULT_INSIGHT_PROMPT: &str = r#"Anda adalah analis hukum yang membaca potongan teks peraturan perundang-undangan Indonesia.

Tuliskan SATU kalimat singkat dalam Bahasa Indonesia yang menjelaskan inti potongan teks berikut: kewajiban, larangan, sanksi, nilai uang, atau tanggal penting yang disebutkan. Jangan menambahkan informasi yang tidak ada di teks.

Teks:
{content}

Jawab HANYA dengan satu kalimat tanpa format atau pengantar."#;
