//! Prompt construction for the financial data formatter

/// Fixed financial data sample embedded in every prompt
pub const SAMPLE_FINANCIAL_DATA: &str = r#"{
  "company": "Apple Inc.",
  "fiscal_year": "2024",
  "currency": "USD",
  "total_revenue": 394328000000,
  "revenue_breakdown": [
    {
      "source": "iPhone",
      "revenue": 205000000000,
      "percentage": 52.0
    },
    {
      "source": "Mac",
      "revenue": 40000000000,
      "percentage": 10.2
    },
    {
      "source": "iPad",
      "revenue": 31000000000,
      "percentage": 7.9
    },
    {
      "source": "Wearables, Home and Accessories",
      "revenue": 41000000000,
      "percentage": 10.4
    },
    {
      "source": "Services",
      "revenue": 77000000000,
      "percentage": 19.5
    }
  ],
  "notes": "Values are approximate and based on the company's fiscal 2024 annual report."
}"#;

/// Charting library the generated document must load
pub const CHART_JS_CDN: &str = "https://cdn.jsdelivr.net/npm/chart.js";

/// Build the visualization prompt for a user intent and a JSON data blob
pub fn build_prompt(user_intent: &str, data: &str) -> String {
    format!(
        r#"You are an expert data visualization tool. Your task is to analyze this JSON data and create an appropriate visualization based on the user's intent.

USER INTENT: {user_intent}

DATA:
```json
{data}
```

Follow these steps:
1. Analyze the data structure and content
2. Determine if visualization would be helpful (based on user intent)
3. If visualization is needed, decide the most appropriate type (bar chart, pie chart, line chart, table, etc.)
4. Create a COMPLETE, SELF-CONTAINED HTML document that includes:
   - All necessary CSS for styling
   - Any required JavaScript libraries via CDN (like Chart.js)
   - The visualization embedded within the document
   - Responsive design that works inside an iframe

Your HTML should work as-is when placed in an iframe without any further processing.
DO NOT include any explanations or markdown - JUST the complete HTML document.
Include Chart.js via CDN: <script src="{CHART_JS_CDN}"></script>
"#
    )
}
